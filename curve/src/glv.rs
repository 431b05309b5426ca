//! GLV scalar decomposition.
//!
//! A scalar `s` is rewritten as `k1 + k2 * lambda (mod r)` with both halves
//! about half the bit length of `r`, by rounding `(s, 0)` to the closest
//! vector of the lattice `{(a, b) : a + b * lambda = 0 mod r}`.

use std::sync::OnceLock;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::fr::Fr;

/// Reduced basis `(v1, v2)` of the GLV lattice together with its determinant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    pub v1: [BigInt; 2],
    pub v2: [BigInt; 2],
    pub det: BigInt,
}

/// Half scalar: sign and magnitude below `2^128`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HalfScalar {
    pub negative: bool,
    pub magnitude: u128,
}

/// Runs the extended Euclidean algorithm on `(r, lambda)` and stops at the
/// first remainder below `sqrt(r)`, which yields a short basis.
pub fn precompute_lattice(r: &BigInt, lambda: &BigInt) -> Lattice {
    let sqrt_r = r.sqrt();

    let (mut a0, mut a1) = (r.clone(), lambda.clone());
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

    while a1 >= sqrt_r {
        let q = &a0 / &a1;
        let a2 = &a0 - &q * &a1;
        let t2 = &t0 - &q * &t1;
        a0 = std::mem::replace(&mut a1, a2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    let v1 = [a1.clone(), -&t1];

    // second vector: the shorter of (a0, -t0) and the next remainder step
    let q = &a0 / &a1;
    let a2 = &a0 - &q * &a1;
    let t2 = &t0 - &q * &t1;
    let norm_prev = &a0 * &a0 + &t0 * &t0;
    let norm_next = &a2 * &a2 + &t2 * &t2;
    let v2 = if norm_prev <= norm_next {
        [a0, -t0]
    } else {
        [a2, -t2]
    };

    let det = &v1[0] * &v2[1] - &v1[1] * &v2[0];
    Lattice { v1, v2, det }
}

/// `round(n / d)`, halves rounded up.
fn round_div(n: &BigInt, d: &BigInt) -> BigInt {
    let two = BigInt::from(2);
    (&two * n + d).div_floor(&(&two * d))
}

/// Splits `s` into `(k1, k2)` with `s = k1 + k2 * lambda (mod r)`.
pub fn split_scalar(s: &BigInt, lattice: &Lattice) -> [BigInt; 2] {
    let b1 = round_div(&(s * &lattice.v2[1]), &lattice.det);
    let b2 = round_div(&(-(s * &lattice.v1[1])), &lattice.det);
    let k1 = s - &b1 * &lattice.v1[0] - &b2 * &lattice.v2[0];
    let k2 = -(&b1 * &lattice.v1[1]) - &b2 * &lattice.v2[1];
    [k1, k2]
}

/// `lambda = x^2 - 1 mod r`, the eigenvalue of `phi` on G2.
pub fn lambda() -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &[
        0xac, 0x45, 0xa4, 0x01, 0x00, 0x01, 0xa4, 0x02, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff,
        0xff,
    ])
}

/// The G2 lattice, derived on first use.
pub fn g2_lattice() -> &'static Lattice {
    static LATTICE: OnceLock<Lattice> = OnceLock::new();
    LATTICE.get_or_init(|| {
        let r = BigInt::from(Fr::modulus());
        let lattice = precompute_lattice(&r, &lambda());
        tracing::debug!(det = %lattice.det, "glv lattice precomputed");
        lattice
    })
}

/// Splits a scalar already reduced mod `r` into two signed 128-bit halves.
pub(crate) fn split_reduced(s: &BigInt) -> [HalfScalar; 2] {
    split_scalar(s, g2_lattice()).map(|k| to_half(&k))
}

fn to_half(k: &BigInt) -> HalfScalar {
    let digits = k.abs().to_u64_digits().1;
    debug_assert!(digits.len() <= 2, "glv half scalar exceeds 128 bits");
    let lo = digits.first().copied().unwrap_or(0) as u128;
    let hi = digits.get(1).copied().unwrap_or(0) as u128;
    HalfScalar {
        negative: k.is_negative(),
        magnitude: lo | (hi << 64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn r() -> BigInt {
        BigInt::from(Fr::modulus())
    }

    #[test]
    fn test_lambda_is_cube_root_of_unity() {
        let l = lambda();
        let r = r();
        // lambda^2 + lambda + 1 = 0 mod r
        assert_eq!((&l * &l + &l + BigInt::one()).mod_floor(&r), BigInt::zero());
    }

    #[test]
    fn test_lattice_vectors_are_in_kernel() {
        let lattice = g2_lattice();
        let r = r();
        let l = lambda();
        for v in [&lattice.v1, &lattice.v2] {
            assert_eq!((&v[0] + &v[1] * &l).mod_floor(&r), BigInt::zero());
        }
        assert_eq!(lattice.det.abs(), r, "basis must span the full lattice");
    }

    #[test]
    fn test_split_recombines() {
        let mut rng = StdRng::seed_from_u64(42);
        let r = r();
        let l = lambda();
        let bound = BigInt::one() << 128;
        let mut scalars = vec![BigInt::zero(), BigInt::one(), &r - 1, l.clone()];
        for _ in 0..100 {
            let s: Fr = rng.random();
            scalars.push(BigInt::from(s.to_biguint()));
        }
        for s in scalars {
            let [k1, k2] = split_scalar(&s, g2_lattice());
            assert_eq!((&k1 + &k2 * &l - &s).mod_floor(&r), BigInt::zero(), "split of {s}");
            assert!(k1.abs() < bound && k2.abs() < bound, "halves of {s} too large");
        }
    }

    #[test]
    fn test_split_edge_values() {
        let lattice = g2_lattice();
        let split = |s: BigInt| split_scalar(&s, lattice);
        // lambda itself lands on the second half only
        assert_eq!(split(lambda()), [BigInt::zero(), BigInt::one()]);
        assert_eq!(split(BigInt::from(5)), [BigInt::from(5), BigInt::zero()]);
        assert_eq!(split(r() - 1), [BigInt::from(-1), BigInt::zero()]);
    }

    #[test]
    fn test_to_half() {
        let h = to_half(&BigInt::from(-5));
        assert_eq!(h, HalfScalar { negative: true, magnitude: 5 });
        let big = (BigInt::one() << 100) + 3;
        assert_eq!(to_half(&big).magnitude, (1u128 << 100) + 3);
    }
}
