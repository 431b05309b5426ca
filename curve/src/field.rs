//! Prime field in Montgomery form over `N` 64-bit limbs.
//!
//! Every modulus is described by a zero-sized [`MontConfig`] implementation;
//! [`MontField`] is monomorphized per configuration so the hot loops never go
//! through dynamic dispatch. The element stores `x * R mod q` with
//! `R = 2^(64 N)` and the stored limbs are always strictly less than `q`.
//!
//! Multiplication is CIOS. When the top word of the modulus leaves a spare
//! bit (`NO_CARRY`), the variant without the extra carry chain is used. The
//! choice is a compile-time constant of the configuration.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Num;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::arith::{
    adc, add_small, add_words, bit_len, lt, mac, nonzero_mask, or_words, select_words, shr,
    sub_small, sub_words,
};
use crate::error::FieldError;
use crate::inverse;

/// Constants of a prime modulus `q` stored over `N` little-endian words.
pub trait MontConfig<const N: usize>:
    'static + Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync
{
    /// Short name used by `Debug`.
    const NAME: &'static str;

    /// The modulus `q`.
    const MODULUS: [u64; N];

    /// `-q^{-1} mod 2^64`.
    const INV: u64;

    /// `R = 2^(64 N) mod q`, i.e. one in Montgomery form.
    const R: [u64; N];

    /// `R^2 mod q`, used to enter Montgomery form.
    const R2: [u64; N];

    /// Number of 31-bit binary GCD rounds the inverse is normalized to.
    const INV_ITERATIONS: usize;

    /// Factor undoing the `2^(-31 * INV_ITERATIONS)` scaling of the binary
    /// GCD, given as raw Montgomery limbs.
    const INV_CORRECTION: [u64; N];

    /// Largest `s` such that `2^s` divides `q - 1`.
    const TWO_ADICITY: u32;

    /// Canonical limbs of a primitive `2^TWO_ADICITY`-th root of unity.
    const TWO_ADIC_ROOT: [u64; N];

    /// Top bit of the modulus is zero and the remaining bits are not all set.
    const NO_CARRY: bool = has_spare_bit(&Self::MODULUS);

    const MODULUS_BITS: u32 = bit_len(&Self::MODULUS);

    /// `q - 2`, the Fermat inversion exponent.
    const MODULUS_MINUS_TWO: [u64; N] = sub_small(&Self::MODULUS, 2);

    /// `(q - 1) / 2`, the Legendre exponent.
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; N] = shr(&sub_small(&Self::MODULUS, 1), 1);

    /// `(q + 1) / 4`, only meaningful when `q = 3 mod 4`.
    const MODULUS_PLUS_ONE_DIV_FOUR: [u64; N] = add_small(&shr(&Self::MODULUS, 2), 1);

    /// Odd part `t` of `q - 1 = 2^s * t`.
    const TRACE: [u64; N] = shr(&sub_small(&Self::MODULUS, 1), Self::TWO_ADICITY);

    /// `(t + 1) / 2`.
    const TRACE_PLUS_ONE_DIV_TWO: [u64; N] = add_small(&shr(&Self::TRACE, 1), 1);
}

const fn has_spare_bit<const N: usize>(modulus: &[u64; N]) -> bool {
    modulus[N - 1] < (u64::MAX >> 1)
}

/// Element of the prime field described by `C`.
#[derive(Copy, Clone)]
pub struct MontField<C: MontConfig<N>, const N: usize> {
    limbs: [u64; N],
    _config: PhantomData<C>,
}

impl<C: MontConfig<N>, const N: usize> MontField<C, N> {
    pub const ZERO: Self = Self::from_montgomery([0u64; N]);

    pub const ONE: Self = Self::from_montgomery(C::R);

    /// Byte width of the fixed-size big-endian encoding.
    pub const BYTES: usize = N * 8;

    /// Wraps limbs that are already in Montgomery form.
    #[inline(always)]
    pub const fn from_montgomery(limbs: [u64; N]) -> Self {
        MontField {
            limbs,
            _config: PhantomData,
        }
    }

    /// The raw Montgomery limbs.
    #[inline(always)]
    pub const fn montgomery_limbs(&self) -> &[u64; N] {
        &self.limbs
    }

    /// Converts canonical limbs into Montgomery form (ToMont).
    ///
    /// The input must be strictly less than the modulus.
    #[inline]
    pub const fn from_raw(canonical: [u64; N]) -> Self {
        Self::from_montgomery(Self::mont_mul(&canonical, &C::R2))
    }

    /// Converts canonical limbs, rejecting values that are not reduced.
    pub fn from_canonical_limbs(canonical: [u64; N]) -> Result<Self, FieldError> {
        if lt(&canonical, &C::MODULUS) {
            Ok(Self::from_raw(canonical))
        } else {
            Err(FieldError::NonCanonical)
        }
    }

    /// Leaves Montgomery form (FromMont).
    #[inline]
    pub const fn to_canonical(&self) -> [u64; N] {
        let mut one = [0u64; N];
        one[0] = 1;
        Self::mont_mul(&self.limbs, &one)
    }

    #[inline]
    pub fn from_u64(val: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = val;
        if lt(&limbs, &C::MODULUS) {
            Self::from_raw(limbs)
        } else {
            Self::from_biguint(&BigUint::from(val))
        }
    }

    pub fn from_i64(val: i64) -> Self {
        let abs = Self::from_u64(val.unsigned_abs());
        if val < 0 {
            -abs
        } else {
            abs
        }
    }

    /// The modulus as an arbitrary-precision integer.
    pub fn modulus() -> BigUint {
        limbs_to_biguint(&C::MODULUS)
    }

    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.to_canonical())
    }

    /// Reduces `value` modulo `q`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % Self::modulus();
        let mut limbs = [0u64; N];
        for (limb, digit) in limbs.iter_mut().zip(reduced.to_u64_digits()) {
            *limb = digit;
        }
        Self::from_raw(limbs)
    }

    /// Big-endian fixed-width encoding of the canonical value.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::BYTES];
        self.write_bytes_be(&mut out);
        out
    }

    /// Writes the canonical value into `out`, which must be `BYTES` long.
    pub fn write_bytes_be(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), Self::BYTES);
        let canonical = self.to_canonical();
        for (chunk, limb) in out.chunks_exact_mut(8).zip(canonical.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
    }

    /// Parses a big-endian fixed-width encoding, rejecting non-canonical input.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self, FieldError> {
        if bytes.len() != Self::BYTES {
            return Err(FieldError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            });
        }
        let mut limbs = [0u64; N];
        for (limb, chunk) in limbs.iter_mut().rev().zip(bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(word);
        }
        Self::from_canonical_limbs(limbs)
    }

    /// Interprets an arbitrary-length big-endian string and reduces it mod `q`.
    pub fn from_bytes_wide_be(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        or_words(&self.limbs) == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        bool::from(self.ct_eq(&Self::ONE))
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    #[inline]
    pub fn square(&self) -> Self {
        Self::from_montgomery(Self::mont_mul(&self.limbs, &self.limbs))
    }

    /// Computes `self / 2`.
    pub fn halve(&self) -> Self {
        let odd = self.limbs[0] & 1;
        let addend = select_words(&[0u64; N], &C::MODULUS, 0u64.wrapping_sub(odd));
        let (sum, carry) = add_words(&self.limbs, &addend);
        let mut out = shr(&sum, 1);
        out[N - 1] |= carry << 63;
        Self::from_montgomery(out)
    }

    /// Branchless select: `cond == 0` yields `a`, anything else yields `b`.
    #[inline]
    pub fn select(cond: u64, a: &Self, b: &Self) -> Self {
        Self::from_montgomery(select_words(&a.limbs, &b.limbs, nonzero_mask(cond)))
    }

    /// Exponentiation by a signed integer; negative exponents invert the base first.
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

    /// Square-and-multiply over little-endian exponent limbs.
    ///
    /// Not constant time; only use with public exponents.
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

    pub fn pow_u64(&self, exp: u64) -> Self {
        self.pow_vartime(&[exp])
    }

    /// Multiplicative inverse; zero maps to zero.
    ///
    /// Moduli with a spare top bit use the binary GCD with 31-bit
    /// approximations. Its result is checked with one multiplication and the
    /// Fermat exponentiation takes over if the check fails.
    pub fn inverse(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        if C::NO_CARRY {
            let candidate = Self::from_montgomery(inverse::bingcd::<C, N>(&self.limbs));
            if (*self * candidate).is_one() {
                return candidate;
            }
            tracing::debug!(field = C::NAME, "binary gcd inverse failed its self-check, using exponentiation");
        }
        self.inverse_exp()
    }

    /// Inverse through Fermat's little theorem, `x^(q-2)`.
    pub fn inverse_exp(&self) -> Self {
        self.pow_vartime(&C::MODULUS_MINUS_TWO)
    }

    /// Inverts every element in place with a single field inversion.
    /// Zero entries are left as zero.
    pub fn batch_invert(values: &mut [Self]) {
        let mut prefix = Vec::with_capacity(values.len());
        let mut acc = Self::ONE;
        for v in values.iter() {
            prefix.push(acc);
            if !v.is_zero() {
                acc *= *v;
            }
        }
        acc = acc.inverse();
        for (v, before) in values.iter_mut().zip(prefix).rev() {
            if v.is_zero() {
                continue;
            }
            let next = acc * *v;
            *v = acc * before;
            acc = next;
        }
    }

    /// Legendre symbol `x^((q-1)/2)`: 1 for a non-zero square, -1 for a
    /// non-residue and 0 for zero.
    pub fn legendre(&self) -> i8 {
        let l = self.pow_vartime(&C::MODULUS_MINUS_ONE_DIV_TWO);
        if l.is_zero() {
            0
        } else if l.is_one() {
            1
        } else {
            -1
        }
    }

    /// Square root, if one exists.
    ///
    /// For `q = 3 mod 4` this is `x^((q+1)/4)` followed by a squaring check;
    /// other moduli go through Tonelli-Shanks.
    pub fn sqrt(&self) -> CtOption<Self> {
        if C::TWO_ADICITY == 1 {
            let y = self.pow_vartime(&C::MODULUS_PLUS_ONE_DIV_FOUR);
            let is_root = y.square().ct_eq(self);
            return CtOption::new(y, is_root);
        }
        self.sqrt_tonelli_shanks()
    }

    // https://eprint.iacr.org/2012/685.pdf (page 12, algorithm 5)
    fn sqrt_tonelli_shanks(&self) -> CtOption<Self> {
        match self.legendre() {
            0 => CtOption::new(*self, Choice::from(1)),
            -1 => CtOption::new(Self::ZERO, Choice::from(0)),
            _ => {
                let mut c = Self::from_raw(C::TWO_ADIC_ROOT);
                let mut r = self.pow_vartime(&C::TRACE_PLUS_ONE_DIV_TWO);
                let mut t = self.pow_vartime(&C::TRACE);
                let mut m = C::TWO_ADICITY;

                while !t.is_one() {
                    let mut i = 1;
                    let mut t2i = t.square();
                    while !t2i.is_one() {
                        t2i = t2i.square();
                        i += 1;
                    }
                    for _ in 0..(m - i - 1) {
                        c = c.square();
                    }
                    r *= c;
                    c = c.square();
                    t *= c;
                    m = i;
                }

                CtOption::new(r, Choice::from(1))
            }
        }
    }

    /// `x > (q-1)/2` on the canonical value. Used as the sign of compressed points.
    pub fn lexicographically_largest(&self) -> bool {
        let (_, borrow) = sub_words(&C::MODULUS_MINUS_ONE_DIV_TWO, &self.to_canonical());
        borrow == 1
    }

    /// The primitive `2^TWO_ADICITY`-th root of unity of the configuration.
    pub fn two_adic_root() -> Self {
        Self::from_raw(C::TWO_ADIC_ROOT)
    }

    /// Final reduction `[0, 2q) -> [0, q)`. `carry` is the word above `t`.
    #[inline(always)]
    const fn reduce_once(t: &[u64; N], carry: u64) -> [u64; N] {
        let (s, borrow) = sub_words(t, &C::MODULUS);
        let mask = nonzero_mask(carry | (borrow ^ 1));
        select_words(t, &s, mask)
    }

    #[inline(always)]
    const fn mont_mul(x: &[u64; N], y: &[u64; N]) -> [u64; N] {
        if C::NO_CARRY {
            Self::mul_no_carry(x, y)
        } else {
            Self::mul_cios(x, y)
        }
    }

    // CIOS, section 2.3.2 of https://www.microsoft.com/en-us/research/wp-content/uploads/1998/06/97Acar.pdf
    // t spans N + 2 words: t[..N], t_n, t_n1.
    const fn mul_cios(x: &[u64; N], y: &[u64; N]) -> [u64; N] {
        let q = &C::MODULUS;
        let mut t = [0u64; N];
        let mut t_n = 0u64;
        let mut i = 0;
        while i < N {
            let mut c = 0;
            let mut j = 0;
            while j < N {
                let (lo, hi) = mac(t[j], x[j], y[i], c);
                t[j] = lo;
                c = hi;
                j += 1;
            }
            let (s, t_n1) = adc(t_n, c, 0);
            t_n = s;

            let m = t[0].wrapping_mul(C::INV);
            let (_, mut c) = mac(t[0], m, q[0], 0);
            let mut j = 1;
            while j < N {
                let (lo, hi) = mac(t[j], m, q[j], c);
                t[j - 1] = lo;
                c = hi;
                j += 1;
            }
            let (s, carry) = adc(t_n, c, 0);
            t[N - 1] = s;
            t_n = t_n1 + carry;
            i += 1;
        }
        Self::reduce_once(&t, t_n)
    }

    // Variant without the t[N+1] carry chain; requires NO_CARRY and inputs < q.
    // https://hackmd.io/@gnark/modular_multiplication
    const fn mul_no_carry(x: &[u64; N], y: &[u64; N]) -> [u64; N] {
        let q = &C::MODULUS;
        let mut t = [0u64; N];
        let mut i = 0;
        while i < N {
            let (t0, mut a) = mac(t[0], x[0], y[i], 0);
            let m = t0.wrapping_mul(C::INV);
            let (_, mut c) = mac(t0, m, q[0], 0);
            let mut j = 1;
            while j < N {
                let (tj, a_hi) = mac(t[j], x[j], y[i], a);
                a = a_hi;
                let (lo, c_hi) = mac(tj, m, q[j], c);
                t[j - 1] = lo;
                c = c_hi;
                j += 1;
            }
            t[N - 1] = c.wrapping_add(a);
            i += 1;
        }
        Self::reduce_once(&t, 0)
    }
}

fn limbs_to_biguint<const N: usize>(limbs: &[u64; N]) -> BigUint {
    let digits: Vec<u32> = limbs
        .iter()
        .flat_map(|l| [*l as u32, (*l >> 32) as u32])
        .collect();
    BigUint::from_slice(&digits)
}

impl<C: MontConfig<N>, const N: usize> Default for MontField<C, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<C: MontConfig<N>, const N: usize> ConstantTimeEq for MontField<C, N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.limbs
            .iter()
            .zip(other.limbs.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl<C: MontConfig<N>, const N: usize> ConditionallySelectable for MontField<C, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mask = 0u64.wrapping_sub(choice.unwrap_u8() as u64);
        Self::from_montgomery(select_words(&a.limbs, &b.limbs, mask))
    }
}

impl<C: MontConfig<N>, const N: usize> PartialEq for MontField<C, N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<C: MontConfig<N>, const N: usize> Eq for MontField<C, N> {}

impl<C: MontConfig<N>, const N: usize> Hash for MontField<C, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

impl<C: MontConfig<N>, const N: usize> Add for MontField<C, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (sum, carry) = add_words(&self.limbs, &rhs.limbs);
        Self::from_montgomery(Self::reduce_once(&sum, carry))
    }
}

impl<C: MontConfig<N>, const N: usize> AddAssign for MontField<C, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<C: MontConfig<N>, const N: usize> Sub for MontField<C, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (diff, borrow) = sub_words(&self.limbs, &rhs.limbs);
        let (wrapped, _) = add_words(&diff, &C::MODULUS);
        Self::from_montgomery(select_words(&diff, &wrapped, 0u64.wrapping_sub(borrow)))
    }
}

impl<C: MontConfig<N>, const N: usize> SubAssign for MontField<C, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<C: MontConfig<N>, const N: usize> Neg for MontField<C, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        -&self
    }
}

impl<C: MontConfig<N>, const N: usize> Neg for &MontField<C, N> {
    type Output = MontField<C, N>;

    #[inline]
    fn neg(self) -> MontField<C, N> {
        let (diff, _) = sub_words(&C::MODULUS, &self.limbs);
        let mask = nonzero_mask(or_words(&self.limbs));
        MontField::from_montgomery(select_words(&[0u64; N], &diff, mask))
    }
}

impl<C: MontConfig<N>, const N: usize> Mul for MontField<C, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_montgomery(Self::mont_mul(&self.limbs, &rhs.limbs))
    }
}

impl<C: MontConfig<N>, const N: usize> MulAssign for MontField<C, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<C: MontConfig<N>, const N: usize> Div for MontField<C, N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl<C: MontConfig<N>, const N: usize> DivAssign for MontField<C, N> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<C: MontConfig<N>, const N: usize> Sum for MontField<C, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<C: MontConfig<N>, const N: usize> Product for MontField<C, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<C: MontConfig<N>, const N: usize> From<u64> for MontField<C, N> {
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl<C: MontConfig<N>, const N: usize> FromStr for MontField<C, N> {
    type Err = FieldError;

    /// Accepts decimal or `0x`-prefixed hexadecimal; the value is reduced mod `q`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => BigUint::from_str_radix(hex, 16),
            None => BigUint::from_str_radix(trimmed, 10),
        };
        match parsed {
            Ok(v) if !trimmed.is_empty() => Ok(Self::from_biguint(&v)),
            _ => Err(FieldError::InvalidInput(s.to_string())),
        }
    }
}

impl<C: MontConfig<N>, const N: usize> Display for MontField<C, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_biguint().to_str_radix(16))
    }
}

impl<C: MontConfig<N>, const N: usize> Debug for MontField<C, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", C::NAME, self)
    }
}

impl<C: MontConfig<N>, const N: usize> Serialize for MontField<C, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes_be().serialize(serializer)
    }
}

impl<'de, C: MontConfig<N>, const N: usize> Deserialize<'de> for MontField<C, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::from_bytes_be(&bytes).map_err(serde::de::Error::custom)
    }
}

impl<C: MontConfig<N>, const N: usize> Distribution<MontField<C, N>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MontField<C, N> {
        let top_bits = C::MODULUS_BITS - (N as u32 - 1) * 64;
        let top_mask = if top_bits == 64 {
            u64::MAX
        } else {
            (1u64 << top_bits) - 1
        };
        loop {
            let mut limbs = [0u64; N];
            for limb in limbs.iter_mut() {
                *limb = rng.random();
            }
            limbs[N - 1] &= top_mask;

            if lt(&limbs, &C::MODULUS) {
                return MontField::from_raw(limbs);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Fp, Fr};
    use num_traits::Zero;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// secp256k1 base field: the top bit of the modulus is set, which forces
    /// the carry-propagating CIOS path and the Fermat inverse.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct Secp256k1Config;

    impl MontConfig<4> for Secp256k1Config {
        const NAME: &'static str = "Secp256k1Fp";
        const MODULUS: [u64; 4] = [
            0xfffffffefffffc2f,
            0xffffffffffffffff,
            0xffffffffffffffff,
            0xffffffffffffffff,
        ];
        const INV: u64 = 0xd838091dd2253531;
        const R: [u64; 4] = [0x00000001000003d1, 0, 0, 0];
        const R2: [u64; 4] = [0x000007a2000e90a1, 0x0000000000000001, 0, 0];
        const INV_ITERATIONS: usize = 0;
        const INV_CORRECTION: [u64; 4] = [0; 4];
        const TWO_ADICITY: u32 = 1;
        const TWO_ADIC_ROOT: [u64; 4] = [
            0xfffffffefffffc2e,
            0xffffffffffffffff,
            0xffffffffffffffff,
            0xffffffffffffffff,
        ];
    }

    /// A 189-bit modulus over three limbs.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct Small189Config;

    impl MontConfig<3> for Small189Config {
        const NAME: &'static str = "Small189";
        const MODULUS: [u64; 3] = [0x6e08691dd8d00acf, 0x72bb251bfc52ed43, 0x1d819dc22c277791];
        const INV: u64 = 0x34caaffd883d43d1;
        const R: [u64; 3] = [0x8fbcb711397fa988, 0x6a26d7201d6895e4, 0x13f311ee9ec44374];
        const R2: [u64; 3] = [0xb4a5a98e28c8b1ac, 0xdaeba0de1f1fda05, 0x01e4ff1b192f04e7];
        const INV_ITERATIONS: usize = 14;
        const INV_CORRECTION: [u64; 3] = [0xb70b2e2034df5463, 0xae38b0f09327be66, 0x016eb49033d3f96b];
        const TWO_ADICITY: u32 = 1;
        const TWO_ADIC_ROOT: [u64; 3] = [0x6e08691dd8d00ace, 0x72bb251bfc52ed43, 0x1d819dc22c277791];
    }

    /// `Small189` with the binary GCD correction left at one, so every
    /// binary GCD result is off by a constant factor.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    struct Small189UncorrectedConfig;

    impl MontConfig<3> for Small189UncorrectedConfig {
        const NAME: &'static str = "Small189Uncorrected";
        const MODULUS: [u64; 3] = Small189Config::MODULUS;
        const INV: u64 = Small189Config::INV;
        const R: [u64; 3] = Small189Config::R;
        const R2: [u64; 3] = Small189Config::R2;
        const INV_ITERATIONS: usize = Small189Config::INV_ITERATIONS;
        const INV_CORRECTION: [u64; 3] = Small189Config::R;
        const TWO_ADICITY: u32 = Small189Config::TWO_ADICITY;
        const TWO_ADIC_ROOT: [u64; 3] = Small189Config::TWO_ADIC_ROOT;
    }

    pub(crate) type Secp = MontField<Secp256k1Config, 4>;
    pub(crate) type Small = MontField<Small189Config, 3>;

    /// Boundary values: 0, 1, q - 1, q - 2 and q - 1 with low bits cleared.
    pub(crate) fn boundary_values<C: MontConfig<N>, const N: usize>() -> Vec<BigUint> {
        let q = MontField::<C, N>::modulus();
        let one = BigUint::from(1u8);
        vec![
            BigUint::zero(),
            one.clone(),
            BigUint::from(2u8),
            &q - &one,
            &q - BigUint::from(2u8),
            (&q - &one) >> 1u32,
            ((&q - &one) >> 8u32) << 8u32,
            ((&q - &one) >> 64u32) << 64u32,
        ]
    }

    fn check_config<C: MontConfig<N>, const N: usize>() {
        let q = MontField::<C, N>::modulus();
        let r = BigUint::from(1u8) << (64 * N);
        assert_eq!(limbs_to_biguint(&C::R), &r % &q, "{}: R", C::NAME);
        assert_eq!(limbs_to_biguint(&C::R2), (&r * &r) % &q, "{}: R2", C::NAME);
        let inv = BigUint::from(C::INV);
        let word = BigUint::from(1u8) << 64;
        assert_eq!((&q * &inv + 1u8) % &word, BigUint::zero(), "{}: INV", C::NAME);
        let root = MontField::<C, N>::two_adic_root();
        let order = BigUint::from(1u8) << C::TWO_ADICITY;
        assert!(root.exp(&BigInt::from(order.clone())).is_one());
        assert!(!root.exp(&BigInt::from(order >> 1u32)).is_one());
    }

    fn cross_check<C: MontConfig<N>, const N: usize>(seed: u64) {
        let q = MontField::<C, N>::modulus();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut values = boundary_values::<C, N>();
        for _ in 0..32 {
            let x: MontField<C, N> = rng.random();
            values.push(x.to_biguint());
        }

        for a in &values {
            let fa = MontField::<C, N>::from_biguint(a);
            assert_eq!(fa.to_biguint(), *a, "{}: round trip", C::NAME);
            assert_eq!((-fa).to_biguint(), (&q - a) % &q, "{}: neg", C::NAME);
            assert_eq!(fa.double().to_biguint(), (a * 2u8) % &q);
            assert_eq!(fa.square().to_biguint(), (a * a) % &q);
            assert_eq!(fa.halve().double(), fa);
            for b in &values {
                let fb = MontField::<C, N>::from_biguint(b);
                assert_eq!((fa + fb).to_biguint(), (a + b) % &q, "{}: add", C::NAME);
                assert_eq!((fa - fb).to_biguint(), (a + &q - b) % &q, "{}: sub", C::NAME);
                assert_eq!((fa * fb).to_biguint(), (a * b) % &q, "{}: mul", C::NAME);
            }
            if !a.is_zero() {
                let inv = fa.inverse();
                assert_eq!(fa * inv, MontField::ONE, "{}: inverse of {a}", C::NAME);
                assert_eq!(inv, fa.inverse_exp(), "{}: inverse paths differ", C::NAME);
            }
        }
    }

    /// Routes `tracing` output to the test harness; filter with `RUST_LOG`.
    pub(crate) fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_config_constants() {
        check_config::<crate::fp::FpConfig, 6>();
        check_config::<crate::fr::FrConfig, 4>();
        check_config::<Secp256k1Config, 4>();
        check_config::<Small189Config, 3>();
    }

    #[test]
    fn test_no_carry_selection() {
        assert!(<crate::fp::FpConfig as MontConfig<6>>::NO_CARRY);
        assert!(<crate::fr::FrConfig as MontConfig<4>>::NO_CARRY);
        assert!(<Small189Config as MontConfig<3>>::NO_CARRY);
        assert!(!<Secp256k1Config as MontConfig<4>>::NO_CARRY);
    }

    #[test]
    fn test_cross_check_fp() {
        init_tracing();
        cross_check::<crate::fp::FpConfig, 6>(1);
    }

    #[test]
    fn test_cross_check_fr() {
        cross_check::<crate::fr::FrConfig, 4>(2);
    }

    #[test]
    fn test_cross_check_carry_cios() {
        cross_check::<Secp256k1Config, 4>(3);
    }

    #[test]
    fn test_cross_check_three_limbs() {
        cross_check::<Small189Config, 3>(4);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(Fp::ZERO + Fp::ZERO, Fp::ZERO);
        assert_eq!(Fp::ONE * Fp::ONE, Fp::ONE);
        assert_eq!(Fp::ZERO * Fp::ONE, Fp::ZERO);
        assert_eq!(-Fp::ZERO, Fp::ZERO);
        assert!(Fp::ONE.is_one());
        assert_eq!(Fp::ONE.to_canonical(), [1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_ring_laws() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let a: Fr = rng.random();
            let b: Fr = rng.random();
            let c: Fr = rng.random();
            assert_eq!(a + b, b + a);
            assert_eq!(a * (b * c), (a * b) * c);
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!(a - a, Fr::ZERO);
        }
    }

    #[test]
    fn test_inverse_falls_back_to_exponentiation() {
        init_tracing();
        type Uncorrected = MontField<Small189UncorrectedConfig, 3>;
        let mut rng = StdRng::seed_from_u64(11);
        let mut values: Vec<Uncorrected> = (0..16).map(|_| rng.random()).collect();
        values.extend([Uncorrected::ONE.double(), -Uncorrected::ONE]);
        for x in values {
            let candidate = Uncorrected::from_montgomery(inverse::bingcd::<Small189UncorrectedConfig, 3>(&x.limbs));
            assert_ne!(x * candidate, Uncorrected::ONE, "binary gcd self-check should fail");
            let inv = x.inverse();
            assert_eq!(inv, x.inverse_exp());
            assert_eq!(x * inv, Uncorrected::ONE);
        }
    }

    #[test]
    fn test_inverse_zero_is_zero() {
        assert_eq!(Fp::ZERO.inverse(), Fp::ZERO);
        assert_eq!(Secp::ZERO.inverse(), Secp::ZERO);
    }

    #[test]
    fn test_batch_invert() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut values: Vec<Fp> = (0..9).map(|_| rng.random()).collect();
        values[3] = Fp::ZERO;
        let expected: Vec<Fp> = values.iter().map(|v| v.inverse()).collect();
        Fp::batch_invert(&mut values);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_exp_signed() {
        let x = Fr::from_u64(5);
        assert_eq!(x.exp(&BigInt::from(0)), Fr::ONE);
        assert_eq!(x.exp(&BigInt::from(3)), Fr::from_u64(125));
        assert_eq!(x.exp(&BigInt::from(-3)), Fr::from_u64(125).inverse());
        assert_eq!(x.exp(&BigInt::from(-1)) * x, Fr::ONE);
    }

    #[test]
    fn test_sqrt_three_mod_four() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut non_residues = 0;
        for _ in 0..40 {
            let x: Fp = rng.random();
            let root = x.sqrt();
            if bool::from(root.is_some()) {
                assert_eq!(x.legendre(), 1);
                let y = root.unwrap();
                assert_eq!(y.square(), x);
            } else {
                assert_eq!(x.legendre(), -1);
                non_residues += 1;
            }
        }
        assert!(non_residues > 0);
        assert_eq!(Fp::ZERO.sqrt().unwrap(), Fp::ZERO);
    }

    #[test]
    fn test_sqrt_tonelli_shanks() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..20 {
            let x: Fr = rng.random();
            let square = x.square();
            let root = square.sqrt().unwrap();
            assert!(root == x || root == -x);
        }
        // 7 generates Fr*, so it is not a square
        assert!(bool::from(Fr::from_u64(7).sqrt().is_none()));
        assert_eq!(Fr::from_u64(7).legendre(), -1);
    }

    #[test]
    fn test_lexicographically_largest() {
        let half = Fp::from_biguint(&((Fp::modulus() - 1u8) >> 1u32));
        assert!(!half.lexicographically_largest());
        assert!((half + Fp::ONE).lexicographically_largest());
        assert!(!Fp::ZERO.lexicographically_largest());
        assert!((-Fp::ONE).lexicographically_largest());
    }

    #[test]
    fn test_select() {
        let a = Fp::from_u64(3);
        let b = Fp::from_u64(9);
        assert_eq!(Fp::select(0, &a, &b), a);
        assert_eq!(Fp::select(1, &a, &b), b);
        assert_eq!(Fp::select(u64::MAX, &a, &b), b);
        assert_eq!(Fp::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(Fp::conditional_select(&a, &b, Choice::from(1)), b);
    }

    #[test]
    fn test_bytes_round_trip_and_rejects() {
        let mut rng = StdRng::seed_from_u64(5);
        let x: Fp = rng.random();
        let bytes = x.to_bytes_be();
        assert_eq!(bytes.len(), 48);
        assert_eq!(Fp::from_bytes_be(&bytes).unwrap(), x);

        let modulus = Fp::modulus().to_bytes_be();
        assert_eq!(Fp::from_bytes_be(&modulus), Err(FieldError::NonCanonical));
        assert_eq!(
            Fp::from_bytes_be(&bytes[1..]),
            Err(FieldError::InvalidLength {
                expected: 48,
                actual: 47
            })
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("12345".parse::<Fr>().unwrap(), Fr::from_u64(12345));
        assert_eq!("0xff".parse::<Fr>().unwrap(), Fr::from_u64(255));
        assert!(matches!("12x".parse::<Fr>(), Err(FieldError::InvalidInput(_))));
        assert!("".parse::<Fr>().is_err());
        // reduced mod r
        let r_plus_one = format!("{}", Fr::modulus() + 1u8);
        assert_eq!(r_plus_one.parse::<Fr>().unwrap(), Fr::ONE);
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(Fr::from_i64(-5) + Fr::from_u64(5), Fr::ZERO);
        assert_eq!(Fr::from_i64(i64::MIN), -Fr::from_u64(1u64 << 63));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut rng = StdRng::seed_from_u64(9);
        let x: Fp = rng.random();
        let encoded = bincode::serialize(&x).unwrap();
        let decoded: Fp = bincode::deserialize(&encoded).unwrap();
        assert_eq!(x, decoded);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Fr::from_u64(255)), "0xff");
        assert_eq!(format!("{:?}", Fr::ZERO), "Fr(0x0)");
    }
}
