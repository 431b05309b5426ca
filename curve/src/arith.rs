//! Word-level helpers shared by the Montgomery field and the inverse.
//!
//! Every routine is a `const fn` over little-endian `[u64; N]` limbs so the
//! field constants can be derived at compile time.

/// Compute `a + b + carry`, returning the low word and the carry out.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Compute `a - b - borrow`, returning the low word and the borrow out (0 or 1).
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, ((t >> 64) as u64) & 1)
}

/// Compute `a + b * c + carry`, returning the low word and the high word.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// `a - b` over N words, returning the difference and the final borrow.
#[inline(always)]
pub(crate) const fn sub_words<const N: usize>(a: &[u64; N], b: &[u64; N]) -> ([u64; N], u64) {
    let mut out = [0u64; N];
    let mut borrow = 0;
    let mut i = 0;
    while i < N {
        let (d, b1) = sbb(a[i], b[i], borrow);
        out[i] = d;
        borrow = b1;
        i += 1;
    }
    (out, borrow)
}

/// `a + b` over N words, returning the sum and the final carry.
#[inline(always)]
pub(crate) const fn add_words<const N: usize>(a: &[u64; N], b: &[u64; N]) -> ([u64; N], u64) {
    let mut out = [0u64; N];
    let mut carry = 0;
    let mut i = 0;
    while i < N {
        let (s, c) = adc(a[i], b[i], carry);
        out[i] = s;
        carry = c;
        i += 1;
    }
    (out, carry)
}

/// Word-wise select: returns `a` when `mask == 0`, `b` when `mask == !0`.
#[inline(always)]
pub(crate) const fn select_words<const N: usize>(a: &[u64; N], b: &[u64; N], mask: u64) -> [u64; N] {
    let mut out = [0u64; N];
    let mut i = 0;
    while i < N {
        out[i] = a[i] ^ (mask & (a[i] ^ b[i]));
        i += 1;
    }
    out
}

/// All-ones if `x != 0`, zero otherwise.
#[inline(always)]
pub(crate) const fn nonzero_mask(x: u64) -> u64 {
    0u64.wrapping_sub((x | x.wrapping_neg()) >> 63)
}

/// OR of all words; zero iff the number is zero.
#[inline(always)]
pub(crate) const fn or_words<const N: usize>(a: &[u64; N]) -> u64 {
    let mut acc = 0;
    let mut i = 0;
    while i < N {
        acc |= a[i];
        i += 1;
    }
    acc
}

/// Subtract a single word, assuming no underflow.
pub(crate) const fn sub_small<const N: usize>(a: &[u64; N], b: u64) -> [u64; N] {
    let mut out = *a;
    let mut borrow = b;
    let mut i = 0;
    while i < N && borrow != 0 {
        let (d, b1) = sbb(out[i], borrow, 0);
        out[i] = d;
        borrow = b1;
        i += 1;
    }
    out
}

/// Add a single word, assuming no overflow.
pub(crate) const fn add_small<const N: usize>(a: &[u64; N], b: u64) -> [u64; N] {
    let mut out = *a;
    let mut carry = b;
    let mut i = 0;
    while i < N && carry != 0 {
        let (s, c) = adc(out[i], carry, 0);
        out[i] = s;
        carry = c;
        i += 1;
    }
    out
}

/// Logical right shift by `shift` bits (any amount).
pub(crate) const fn shr<const N: usize>(a: &[u64; N], shift: u32) -> [u64; N] {
    let words = (shift / 64) as usize;
    let bits = shift % 64;
    let mut out = [0u64; N];
    let mut i = 0;
    while i + words < N {
        let lo = a[i + words] >> bits;
        let hi = if bits != 0 && i + words + 1 < N {
            a[i + words + 1] << (64 - bits)
        } else {
            0
        };
        out[i] = lo | hi;
        i += 1;
    }
    out
}

/// Number of significant bits.
pub(crate) const fn bit_len<const N: usize>(a: &[u64; N]) -> u32 {
    let mut i = N;
    while i > 0 {
        i -= 1;
        if a[i] != 0 {
            return (i as u32) * 64 + (64 - a[i].leading_zeros());
        }
    }
    0
}

/// Count of trailing zero bits; zero input returns `64 * N`.
pub(crate) const fn trailing_zeros<const N: usize>(a: &[u64; N]) -> u32 {
    let mut i = 0;
    while i < N {
        if a[i] != 0 {
            return (i as u32) * 64 + a[i].trailing_zeros();
        }
        i += 1;
    }
    (N as u32) * 64
}

/// Variable-time comparison `a < b`.
pub(crate) const fn lt<const N: usize>(a: &[u64; N], b: &[u64; N]) -> bool {
    let (_, borrow) = sub_words(a, b);
    borrow == 1
}
