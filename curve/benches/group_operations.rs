use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curve::{batch_scalar_multiplication, Fr, G2Affine, G2Jac, Group, RandomField};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_jacobian_double(c: &mut Criterion) {
    let g = G2Jac::generator();
    c.bench_function("g2_double", |bencher| {
        bencher.iter(|| black_box(black_box(g).double()))
    });
}

fn bench_jacobian_add(c: &mut Criterion) {
    let g = G2Jac::generator();
    let h = g.double();
    let h_affine = h.to_affine();
    c.bench_function("g2_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
    c.bench_function("g2_add_mixed", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h_affine)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let g = G2Jac::generator();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = Fr::random(&mut rng);
    let big = scalar.to_biguint();

    c.bench_function("g2_scalar_mul_glv", |bencher| {
        bencher.iter(|| black_box(black_box(g) * black_box(scalar)))
    });
    c.bench_function("g2_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(g).mul_windowed(black_box(&big))))
    });
    c.bench_function("g2_scalar_mul_double_and_add", |bencher| {
        bencher.iter(|| black_box(<G2Jac as Group>::scalar_mul(&black_box(g), black_box(&scalar))))
    });
}

fn bench_subgroup_and_cofactor(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p: G2Jac = rng.random();
    c.bench_function("g2_is_in_subgroup", |bencher| {
        bencher.iter(|| black_box(black_box(p).is_in_subgroup()))
    });
    c.bench_function("g2_clear_cofactor", |bencher| {
        bencher.iter(|| black_box(black_box(p).clear_cofactor()))
    });
    let h = BigUint::from(curve::X_ABS);
    c.bench_function("g2_mul_by_x_abs", |bencher| {
        bencher.iter(|| black_box(black_box(p).mul_windowed(&h)))
    });
}

fn bench_encoding(c: &mut Criterion) {
    let p = G2Affine::generator();
    let bytes = p.to_compressed();
    c.bench_function("g2_to_compressed", |bencher| {
        bencher.iter(|| black_box(black_box(p).to_compressed()))
    });
    c.bench_function("g2_from_compressed", |bencher| {
        bencher.iter(|| black_box(G2Affine::from_bytes(black_box(&bytes))))
    });
}

fn bench_batch_scalar_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("g2_batch_scalar_mul");
    let base = G2Affine::generator();

    for size in [16, 64, 256].iter() {
        let mut rng = StdRng::seed_from_u64(12345);
        let scalars: Vec<Fr> = (0..*size).map(|_| Fr::random(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bencher, _| {
            bencher.iter(|| black_box(batch_scalar_multiplication(&base, black_box(&scalars))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_jacobian_double,
    bench_jacobian_add,
    bench_scalar_mul,
    bench_subgroup_and_cofactor,
    bench_encoding,
    bench_batch_scalar_mul
);
criterion_main!(benches);
