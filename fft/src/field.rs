use core::fmt::Debug;
use core::ops::{Add, Mul, MulAssign, Neg, Sub};

use curve::{Fr, MULTIPLICATIVE_GENERATOR};

/// A prime field with a large power-of-two subgroup in its multiplicative
/// group.
pub trait FftField:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    /// Largest `s` such that `2^s` divides `q - 1`.
    const TWO_ADICITY: u32;

    fn zero() -> Self;
    fn one() -> Self;
    fn from_u64(v: u64) -> Self;
    fn inverse(&self) -> Self;
    fn pow_u64(&self, exp: u64) -> Self;

    /// Primitive `2^TWO_ADICITY`-th root of unity.
    fn two_adic_root() -> Self;

    /// Generator of the whole multiplicative group, used as coset shift.
    fn multiplicative_generator() -> Self;
}

impl FftField for Fr {
    const TWO_ADICITY: u32 = 32;

    #[inline]
    fn zero() -> Self {
        Fr::ZERO
    }

    #[inline]
    fn one() -> Self {
        Fr::ONE
    }

    #[inline]
    fn from_u64(v: u64) -> Self {
        Fr::from_u64(v)
    }

    #[inline]
    fn inverse(&self) -> Self {
        Fr::inverse(self)
    }

    #[inline]
    fn pow_u64(&self, exp: u64) -> Self {
        Fr::pow_u64(self, exp)
    }

    #[inline]
    fn two_adic_root() -> Self {
        Fr::two_adic_root()
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        MULTIPLICATIVE_GENERATOR
    }
}
