//! Binary extended GCD inversion for moduli with a spare top bit.
//!
//! Pornin's optimized binary GCD (<https://eprint.iacr.org/2020/972>): each
//! round runs 31 steps on 64-bit approximations of `a` and `b`, then applies
//! the accumulated update factors to the full-width values. Factors of two
//! consecutive rounds are merged before touching the Montgomery pair `(u, v)`,
//! so every update divides by exactly `2^64` and folds into a Montgomery
//! reduction. The remaining power of two is removed by a single constant
//! multiplication with `INV_CORRECTION`.

use crate::arith::{add_words, bit_len, mac, nonzero_mask, or_words, select_words, sub_words};
use crate::field::{MontConfig, MontField};

const LOW_BITS: u32 = 31;
const HIGH_BITS: u32 = 33;

/// Two's complement integer spanning `N + 1` words.
#[derive(Copy, Clone)]
struct Wide<const N: usize> {
    lo: [u64; N],
    hi: u64,
}

impl<const N: usize> Wide<N> {
    fn is_negative(&self) -> bool {
        self.hi >> 63 == 1
    }

    fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            *self
        }
    }

    fn negate(&self) -> Self {
        let mut lo = [0u64; N];
        let mut carry = 1u64;
        for (out, limb) in lo.iter_mut().zip(self.lo.iter()) {
            let (s, c) = (!limb).overflowing_add(carry);
            *out = s;
            carry = c as u64;
        }
        Wide {
            lo,
            hi: (!self.hi).wrapping_add(carry),
        }
    }

    fn add(&self, other: &Self) -> Self {
        let (lo, carry) = add_words(&self.lo, &other.lo);
        Wide {
            lo,
            hi: self.hi.wrapping_add(other.hi).wrapping_add(carry),
        }
    }

    /// `x * f` for an unsigned `x` and a signed word factor.
    fn mul_signed(x: &[u64; N], f: i64) -> Self {
        let m = f.unsigned_abs();
        let mut lo = [0u64; N];
        let mut carry = 0;
        for (out, limb) in lo.iter_mut().zip(x.iter()) {
            let (l, h) = mac(0, *limb, m, carry);
            *out = l;
            carry = h;
        }
        let w = Wide { lo, hi: carry };
        if f < 0 {
            w.negate()
        } else {
            w
        }
    }

    /// Arithmetic shift right by `LOW_BITS`, truncated to `N` words.
    fn shr_low(&self) -> [u64; N] {
        let mut out = [0u64; N];
        for i in 0..N {
            let next = if i + 1 < N { self.lo[i + 1] } else { self.hi };
            out[i] = (self.lo[i] >> LOW_BITS) | (next << (64 - LOW_BITS));
        }
        out
    }
}

/// 64 bits of `x` starting at bit position `pos`.
fn bits_at<const N: usize>(x: &[u64; N], pos: u32) -> u64 {
    let word = (pos / 64) as usize;
    let off = pos % 64;
    let lo = x[word] >> off;
    let hi = if off != 0 && word + 1 < N {
        x[word + 1] << (64 - off)
    } else {
        0
    };
    lo | hi
}

/// Keeps the low 31 bits and the top 33 bits of an `n`-bit value.
fn approximate<const N: usize>(x: &[u64; N], n: u32) -> u64 {
    if n <= 64 {
        return x[0];
    }
    let low = x[0] & ((1u64 << LOW_BITS) - 1);
    let top = bits_at(x, n - HIGH_BITS) & ((1u64 << HIGH_BITS) - 1);
    low | (top << LOW_BITS)
}

/// Montgomery reduction of a single `N`-word value, result in `[0, q)`.
fn redc<C: MontConfig<N>, const N: usize>(x: &[u64; N]) -> [u64; N] {
    let q = &C::MODULUS;
    let mut t = *x;
    for _ in 0..N {
        let m = t[0].wrapping_mul(C::INV);
        let (_, mut c) = mac(t[0], m, q[0], 0);
        for j in 1..N {
            let (lo, hi) = mac(t[j], m, q[j], c);
            t[j - 1] = lo;
            c = hi;
        }
        t[N - 1] = c;
    }
    reduce_once::<C, N>(&t)
}

fn reduce_once<C: MontConfig<N>, const N: usize>(t: &[u64; N]) -> [u64; N] {
    let (s, borrow) = sub_words(t, &C::MODULUS);
    select_words(t, &s, nonzero_mask(borrow ^ 1))
}

fn add_mod<C: MontConfig<N>, const N: usize>(a: &[u64; N], b: &[u64; N]) -> [u64; N] {
    let (s, _) = add_words(a, b);
    reduce_once::<C, N>(&s)
}

/// `(f * x + g * y) / 2^(64 N) mod q` for `x, y < q`.
fn update_factor<C: MontConfig<N>, const N: usize>(
    x: &[u64; N],
    f: i64,
    y: &[u64; N],
    g: i64,
) -> [u64; N] {
    let sum = Wide::mul_signed(x, f).add(&Wide::mul_signed(y, g));
    let negative = sum.is_negative();
    let abs = sum.abs();

    // hi * 2^(64N) / 2^(64N) = hi, and hi < 2^63 < q
    let mut hi = [0u64; N];
    hi[0] = abs.hi;
    let r = add_mod::<C, N>(&redc::<C, N>(&abs.lo), &hi);

    let (neg, _) = sub_words(&C::MODULUS, &r);
    let is_nonzero = nonzero_mask(or_words(&r));
    let neg = select_words(&[0u64; N], &neg, is_nonzero);
    select_words(&r, &neg, 0u64.wrapping_sub(negative as u64))
}

/// Inverse of the Montgomery limbs `x` (non-zero, `< q`), returned in
/// Montgomery form. The caller verifies the result.
pub(crate) fn bingcd<C: MontConfig<N>, const N: usize>(x: &[u64; N]) -> [u64; N] {
    let mut a = *x;
    let mut b = C::MODULUS;
    let mut u = [0u64; N];
    u[0] = 1;
    let mut v = [0u64; N];

    let (mut pf0, mut pg0, mut pf1, mut pg1) = (0i64, 0i64, 0i64, 0i64);
    let mut i = 0usize;

    while i & 1 == 1 || or_words(&a) != 0 {
        let n = bit_len(&a).max(bit_len(&b));
        let mut a_approx = approximate(&a, n);
        let mut b_approx = approximate(&b, n);

        let (mut f0, mut g0, mut f1, mut g1) = (1i64, 0i64, 0i64, 1i64);
        for _ in 0..LOW_BITS {
            if a_approx & 1 == 1 {
                let s;
                if a_approx < b_approx {
                    s = b_approx - a_approx;
                    b_approx = a_approx;
                    core::mem::swap(&mut f0, &mut f1);
                    core::mem::swap(&mut g0, &mut g1);
                } else {
                    s = a_approx - b_approx;
                }
                a_approx = s >> 1;
                f0 -= f1;
                g0 -= g1;
            } else {
                a_approx >>= 1;
            }
            f1 <<= 1;
            g1 <<= 1;
        }

        let next_a = Wide::mul_signed(&a, f0).add(&Wide::mul_signed(&b, g0));
        if next_a.is_negative() {
            f0 = -f0;
            g0 = -g0;
        }
        let next_b = Wide::mul_signed(&a, f1).add(&Wide::mul_signed(&b, g1));
        if next_b.is_negative() {
            f1 = -f1;
            g1 = -g1;
        }
        a = next_a.abs().shr_low();
        b = next_b.abs().shr_low();

        if i & 1 == 1 {
            let merge = |x: i64, px: i64, y: i64, py: i64| -> i64 {
                ((x as i128) * (px as i128) + (y as i128) * (py as i128)) as i64
            };
            let big_f0 = merge(f0, pf0, g0, pf1);
            let big_g0 = merge(f0, pg0, g0, pg1);
            let big_f1 = merge(f1, pf0, g1, pf1);
            let big_g1 = merge(f1, pg0, g1, pg1);

            let old_u = u;
            u = update_factor::<C, N>(&u, big_f0, &v, big_g0);
            v = update_factor::<C, N>(&old_u, big_f1, &v, big_g1);
        } else {
            pf0 = f0;
            pg0 = g0;
            pf1 = f1;
            pg1 = g1;
        }
        i += 1;
    }

    // Normalize the power of two to the fixed iteration count.
    let mut shift = [0u64; N];
    shift[0] = 1u64 << (2 * LOW_BITS);
    let shift = MontField::<C, N>::from_montgomery(shift);
    let mut acc = MontField::<C, N>::from_montgomery(v);
    while i < C::INV_ITERATIONS {
        acc *= shift;
        i += 2;
    }
    *(acc * MontField::from_montgomery(C::INV_CORRECTION)).montgomery_limbs()
}
