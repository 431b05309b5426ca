//! Shallue-van de Woestijne map to the G2 twist and the hash/encode
//! constructions built on it.

use curve::{Fp2, G2Affine, G2Jac, B_TWIST};

use crate::constants::{C1, C2, C3, C4, Z};
use crate::errors::HashToCurveError;
use crate::expand::hash_to_field;

#[inline]
fn curve_rhs(x: &Fp2) -> Fp2 {
    x.square() * *x + B_TWIST
}

/// 1 when `e` is a square (zero included), 0 otherwise.
#[inline]
fn is_square(e: &Fp2) -> u64 {
    (e.legendre() >= 0) as u64
}

/// Sign of an `Fp2` element as defined for hash-to-curve: the parity of `c0`,
/// or of `c1` when `c0` is zero.
#[inline]
pub fn g2_sgn0(u: &Fp2) -> u64 {
    u.sgn0()
}

/// Maps `u` to a point of `E'(Fp2)`. The candidate `x` is chosen with
/// branchless selects; the result is generally outside G2.
pub fn map_to_curve(u: &Fp2) -> G2Affine {
    let mut tv1 = u.square() * C1;
    let tv2 = Fp2::ONE + tv1;
    tv1 = Fp2::ONE - tv1;
    // inv0: zero maps to zero
    let tv3 = (tv1 * tv2).inverse();
    let tv4 = *u * tv1 * tv3 * C3;

    let x1 = C2 - tv4;
    let gx1 = curve_rhs(&x1);
    let e1 = is_square(&gx1);

    let x2 = C2 + tv4;
    let gx2 = curve_rhs(&x2);
    let e2 = is_square(&gx2) & (e1 ^ 1);

    // x3 = (tv2^2 * tv3)^2 * c4 + Z, square by construction
    let x3 = (tv2.square() * tv3).square() * C4 + Z;

    let mut x = Fp2::select(e1, &x3, &x1);
    x = Fp2::select(e2, &x, &x2);

    let gx = curve_rhs(&x);
    let y = gx.sqrt().unwrap_or(Fp2::ZERO);
    let flip = g2_sgn0(u) ^ g2_sgn0(&y);
    let y = Fp2::select(flip, &y, &-y);

    G2Affine::new(x, y)
}

/// Maps `u` into G2: `map_to_curve` followed by cofactor clearing.
pub fn map_to_g2(u: &Fp2) -> G2Affine {
    G2Jac::from_affine(&map_to_curve(u))
        .clear_cofactor()
        .to_affine()
}

/// Nonuniform encoding (`encode_to_curve`): one field element, one map.
pub fn encode_to_g2(msg: &[u8], dst: &[u8]) -> Result<G2Affine, HashToCurveError> {
    let u = hash_to_field(msg, dst, 2)?;
    Ok(map_to_g2(&Fp2::new(u[0], u[1])))
}

/// Random-oracle hash (`hash_to_curve`): two independent maps, added, then
/// cofactor cleared.
pub fn hash_to_g2(msg: &[u8], dst: &[u8]) -> Result<G2Affine, HashToCurveError> {
    let u = hash_to_field(msg, dst, 4)?;
    let q0 = map_to_curve(&Fp2::new(u[0], u[1]));
    let q1 = map_to_curve(&Fp2::new(u[2], u[3]));

    let mut q = G2Jac::from_affine(&q0);
    q.add_mixed(&q1);
    tracing::trace!(msg_len = msg.len(), "hashing to G2");
    Ok(q.clear_cofactor().to_affine())
}
