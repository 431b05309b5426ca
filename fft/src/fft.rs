//! Radix-2 transforms over a [`Domain`].
//!
//! The forward transform is decimation in frequency: natural-order input,
//! bit-reversed output. The inverse is decimation in time and undoes it, so
//! the pair composes to the identity without any explicit permutation.

use rayon::prelude::*;

use crate::domain::Domain;
use crate::field::FftField;

/// Below this many butterflies a stage runs on the calling thread.
const PARALLEL_THRESHOLD: usize = 1 << 10;

impl<F: FftField> Domain<F> {
    /// Evaluates the polynomial with coefficients `a` on the domain.
    /// The evaluations come out in bit-reversed order.
    pub fn fft(&self, a: &mut [F]) {
        self.check_len(a);
        dif(a, &self.twiddles);
    }

    /// Interpolates bit-reversed evaluations back to coefficients.
    pub fn fft_inverse(&self, a: &mut [F]) {
        self.check_len(a);
        dit(a, &self.twiddles_inv);
        scale(a, self.cardinality_inv);
    }

    /// Evaluates on the coset `multiplicative_gen * <generator>`, output in
    /// bit-reversed order.
    pub fn coset_fft(&self, a: &mut [F]) {
        self.check_len(a);
        mul_pointwise(a, &self.coset_table);
        dif(a, &self.twiddles);
    }

    /// Inverse of [`Domain::coset_fft`].
    pub fn coset_fft_inverse(&self, a: &mut [F]) {
        self.check_len(a);
        dit(a, &self.twiddles_inv);
        scale(a, self.cardinality_inv);
        mul_pointwise(a, &self.coset_table_inv);
    }

    fn check_len(&self, a: &[F]) {
        assert_eq!(
            a.len() as u64,
            self.cardinality,
            "input length must equal the domain cardinality"
        );
    }
}

fn scale<F: FftField>(a: &mut [F], c: F) {
    if a.len() >= PARALLEL_THRESHOLD {
        a.par_iter_mut().for_each(|x| *x *= c);
    } else {
        a.iter_mut().for_each(|x| *x *= c);
    }
}

fn mul_pointwise<F: FftField>(a: &mut [F], table: &[F]) {
    if a.len() >= PARALLEL_THRESHOLD {
        a.par_iter_mut().zip(table.par_iter()).for_each(|(x, t)| *x *= *t);
    } else {
        a.iter_mut().zip(table).for_each(|(x, t)| *x *= *t);
    }
}

/// Stage `s` works on blocks of `n >> s` with twiddles `twiddles[s]`.
fn dif<F: FftField>(a: &mut [F], twiddles: &[Vec<F>]) {
    let n = a.len();
    for (stage, tw) in twiddles.iter().enumerate() {
        let m = n >> stage;
        for_each_block(a, m, |block| butterfly_dif(block, tw));
    }
}

fn dit<F: FftField>(a: &mut [F], twiddles: &[Vec<F>]) {
    let n = a.len();
    for (stage, tw) in twiddles.iter().enumerate().rev() {
        let m = n >> stage;
        for_each_block(a, m, |block| butterfly_dit(block, tw));
    }
}

fn for_each_block<F, B>(a: &mut [F], m: usize, butterfly: B)
where
    F: FftField,
    B: Fn(&mut [F]) + Send + Sync,
{
    if a.len() >= PARALLEL_THRESHOLD && a.len() > m {
        a.par_chunks_mut(m).for_each(butterfly);
    } else {
        a.chunks_mut(m).for_each(butterfly);
    }
}

/// `(x, y) -> (x + y, (x - y) w^j)`
fn butterfly_dif<F: FftField>(block: &mut [F], tw: &[F]) {
    let half = block.len() / 2;
    let (lo, hi) = block.split_at_mut(half);
    let step = |((x, y), w): ((&mut F, &mut F), &F)| {
        let t = *x - *y;
        *x = *x + *y;
        *y = t * *w;
    };
    if half >= PARALLEL_THRESHOLD {
        lo.par_iter_mut()
            .zip(hi.par_iter_mut())
            .zip(tw[..half].par_iter())
            .for_each(step);
    } else {
        lo.iter_mut().zip(hi.iter_mut()).zip(&tw[..half]).for_each(step);
    }
}

/// `(x, y) -> (x + y w^j, x - y w^j)`
fn butterfly_dit<F: FftField>(block: &mut [F], tw: &[F]) {
    let half = block.len() / 2;
    let (lo, hi) = block.split_at_mut(half);
    let step = |((x, y), w): ((&mut F, &mut F), &F)| {
        let t = *y * *w;
        *y = *x - t;
        *x = *x + t;
    };
    if half >= PARALLEL_THRESHOLD {
        lo.par_iter_mut()
            .zip(hi.par_iter_mut())
            .zip(tw[..half].par_iter())
            .for_each(step);
    } else {
        lo.iter_mut().zip(hi.iter_mut()).zip(&tw[..half]).for_each(step);
    }
}
