//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`, the coordinate field of G2.

use core::fmt::{self, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::{BigInt, Sign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::arith::shr;
use crate::field::MontConfig;
use crate::fp::{Fp, FpConfig};

/// Element `c0 + c1 * u` with `u^2 = -1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fp2 {
    pub c0: Fp,
    pub c1: Fp,
}

impl Fp2 {
    pub const ZERO: Self = Fp2 {
        c0: Fp::ZERO,
        c1: Fp::ZERO,
    };

    pub const ONE: Self = Fp2 {
        c0: Fp::ONE,
        c1: Fp::ZERO,
    };

    #[inline]
    pub const fn new(c0: Fp, c1: Fp) -> Self {
        Fp2 { c0, c1 }
    }

    /// Builds an element from canonical limbs of both coordinates.
    pub const fn from_raw(c0: [u64; 6], c1: [u64; 6]) -> Self {
        Fp2 {
            c0: Fp::from_raw(c0),
            c1: Fp::from_raw(c1),
        }
    }

    #[inline]
    pub fn from_fp(c0: Fp) -> Self {
        Fp2 { c0, c1: Fp::ZERO }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() & self.c1.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        bool::from(self.ct_eq(&Self::ONE))
    }

    #[inline]
    pub fn double(&self) -> Self {
        Fp2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Complex squaring: `(a + b)(a - b) + 2ab u`.
    pub fn square(&self) -> Self {
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0.double();
        Fp2 {
            c0: a * b,
            c1: c * self.c1,
        }
    }

    /// `conj(c0 + c1 u) = c0 - c1 u`, the Frobenius map on `Fp2`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Multiplies both coordinates by a base field element.
    #[inline]
    pub fn mul_by_element(&self, e: &Fp) -> Self {
        Fp2 {
            c0: self.c0 * *e,
            c1: self.c1 * *e,
        }
    }

    /// Multiplies by the sextic non-residue `1 + u`.
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Self {
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// `c0^2 + c1^2`, the norm down to `Fp`.
    #[inline]
    pub fn norm(&self) -> Fp {
        self.c0.square() + self.c1.square()
    }

    /// Inverse through the norm; zero maps to zero.
    pub fn inverse(&self) -> Self {
        let t = self.norm().inverse();
        Fp2 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        }
    }

    pub fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;
        for &limb in exp.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if (limb >> i) & 1 == 1 {
                    res *= *self;
                }
            }
        }
        res
    }

    /// Exponentiation by a signed integer.
    pub fn exp(&self, k: &BigInt) -> Self {
        let (sign, magnitude) = k.to_u64_digits();
        if magnitude.is_empty() {
            return Self::ONE;
        }
        let base = if sign == Sign::Minus {
            self.inverse()
        } else {
            *self
        };
        base.pow_vartime(&magnitude)
    }

    /// Legendre symbol, computed on the norm.
    pub fn legendre(&self) -> i8 {
        self.norm().legendre()
    }

    /// Square root for `q = 3 mod 4`.
    ///
    /// Algorithm 9 of <https://eprint.iacr.org/2012/685.pdf>; the result is
    /// checked by squaring, so a non-residue yields none.
    pub fn sqrt(&self) -> CtOption<Self> {
        // (q - 3) / 4
        let a1 = self.pow_vartime(&shr(&<FpConfig as MontConfig<6>>::MODULUS, 2));
        let alpha = a1.square() * *self;
        let x0 = *self * a1;

        let minus_one = -Self::ONE;
        let when_minus_one = Fp2 {
            c0: -x0.c1,
            c1: x0.c0,
        };
        let b = (Self::ONE + alpha)
            .pow_vartime(&<FpConfig as MontConfig<6>>::MODULUS_MINUS_ONE_DIV_TWO);
        let otherwise = b * x0;

        let res = Self::conditional_select(&otherwise, &when_minus_one, alpha.ct_eq(&minus_one));
        CtOption::new(res, res.square().ct_eq(self))
    }

    /// Ordering used for the sign bit of compressed encodings: the
    /// imaginary part decides unless it is zero.
    pub fn lexicographically_largest(&self) -> bool {
        if self.c1.is_zero() {
            self.c0.lexicographically_largest()
        } else {
            self.c1.lexicographically_largest()
        }
    }

    /// Branchless select: `cond == 0` yields `a`, anything else yields `b`.
    #[inline]
    pub fn select(cond: u64, a: &Self, b: &Self) -> Self {
        Fp2 {
            c0: Fp::select(cond, &a.c0, &b.c0),
            c1: Fp::select(cond, &a.c1, &b.c1),
        }
    }

    /// Parity of the canonical representation, low coordinate first.
    pub fn sgn0(&self) -> u64 {
        let c0 = self.c0.to_canonical();
        let c1 = self.c1.to_canonical();
        let sign0 = c0[0] & 1;
        let zero0 = self.c0.is_zero() as u64;
        let sign1 = c1[0] & 1;
        sign0 | (zero0 & sign1)
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl Add for Fp2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fp2 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}

impl AddAssign for Fp2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fp2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fp2 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}

impl SubAssign for Fp2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fp2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        -&self
    }
}

impl Neg for &Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        Fp2 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl Mul for Fp2 {
    type Output = Self;

    /// Karatsuba: three base field multiplications.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        let b = self.c0 * rhs.c0;
        let c = self.c1 * rhs.c1;
        Fp2 {
            c0: b - c,
            c1: a - b - c,
        }
    }
}

impl MulAssign for Fp2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for Fp2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Fp2 {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl From<u64> for Fp2 {
    fn from(v: u64) -> Self {
        Fp2::from_fp(Fp::from_u64(v))
    }
}

impl From<Fp> for Fp2 {
    fn from(c0: Fp) -> Self {
        Fp2::from_fp(c0)
    }
}

impl Display for Fp2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}*u", self.c0, self.c1)
    }
}

impl Distribution<Fp2> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp2 {
        Fp2 {
            c0: rng.random(),
            c1: rng.random(),
        }
    }
}
