//! Fixed-base batch scalar multiplication with signed windows.

use crate::fr::Fr;
use crate::g2::{G2Affine, G2Jac};
use crate::parallel;

const SCALAR_BITS: u64 = 256;
const SCALAR_LIMBS: usize = 4;

/// Location of one `c`-bit window inside a 4-limb scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selector {
    pub index: usize,
    pub shift: u64,
    pub mask: u64,
    /// The window straddles `index` and `index + 1`.
    pub multi_word_select: bool,
    pub mask_high: u64,
    pub shift_high: u64,
}

impl Selector {
    fn new(chunk: u64, c: u64) -> Self {
        let mask = (1u64 << c) - 1;
        let jc = chunk * c;
        let index = (jc / 64) as usize;
        let shift = jc - (index as u64) * 64;
        let multi_word_select =
            64 % c != 0 && shift > 64 - c && index < SCALAR_LIMBS - 1;
        let (mask_high, shift_high) = if multi_word_select {
            let bits_high = shift - (64 - c);
            ((1u64 << bits_high) - 1, c - bits_high)
        } else {
            (0, 0)
        };
        Selector {
            index,
            shift,
            mask: mask << shift,
            multi_word_select,
            mask_high,
            shift_high,
        }
    }

    /// Extracts the window from `limbs`.
    #[inline]
    fn select(&self, limbs: &[u64; SCALAR_LIMBS]) -> u64 {
        let mut bits = (limbs[self.index] & self.mask) >> self.shift;
        if self.multi_word_select {
            bits += (limbs[self.index + 1] & self.mask_high) << self.shift_high;
        }
        bits
    }

    /// ORs a `c`-bit window value back into `limbs`.
    #[inline]
    fn write(&self, limbs: &mut [u64; SCALAR_LIMBS], bits: u64) {
        limbs[self.index] |= bits << self.shift;
        if self.multi_word_select {
            limbs[self.index + 1] |= bits >> self.shift_high;
        }
    }
}

fn nb_chunks(c: u64) -> u64 {
    SCALAR_BITS.div_ceil(c)
}

/// Window size minimising `2^(c-1) + n (bits + chunks)` group operations.
pub(crate) fn best_window(nb_points: u64) -> u64 {
    let mut min = u64::MAX;
    let mut best = 0;
    for c in 2..18u64 {
        let cost = (1u64 << (c - 1)) + nb_points * (SCALAR_BITS + nb_chunks(c));
        if cost < min {
            min = cost;
            best = c;
        }
    }
    best
}

pub(crate) fn selectors(c: u64) -> Vec<Selector> {
    (0..nb_chunks(c)).map(|chunk| Selector::new(chunk, c)).collect()
}

/// Recodes canonical scalars into signed `c`-bit digits.
///
/// A digit `d >= 2^(c-1)` becomes `d - 2^c` with a carry into the next window.
/// Negative digits are stored as `(-d - 1) | 2^(c-1)`, so the top bit of a
/// window marks a subtraction.
pub(crate) fn partition_scalars(scalars: &[Fr], c: u64) -> Vec<[u64; SCALAR_LIMBS]> {
    let msb_window = 1u64 << (c - 1);
    let max = 1i64 << (c - 1);
    let selectors = selectors(c);

    let mut out = vec![[0u64; SCALAR_LIMBS]; scalars.len()];
    parallel::execute_mut(&mut out, |start, out| {
        let end = start + out.len();
        for (scalar, digits) in scalars[start..end].iter().zip(out.iter_mut()) {
            let limbs = scalar.to_canonical();
            let mut carry = 0i64;
            for s in &selectors {
                let mut digit = carry + s.select(&limbs) as i64;
                carry = 0;
                if digit == 0 {
                    continue;
                }
                if digit >= max {
                    digit -= 1i64 << c;
                    carry = 1;
                }
                let bits = if digit >= 0 {
                    digit as u64
                } else {
                    ((-digit - 1) as u64) | msb_window
                };
                s.write(digits, bits);
            }
            // canonical scalars are below 2^255, and c >= 5 for any batch size
            debug_assert_eq!(carry, 0, "signed recoding overflowed the top window");
        }
    });
    out
}

/// Multiplies one fixed base by every scalar and returns affine results.
pub fn batch_scalar_multiplication(base: &G2Affine, scalars: &[Fr]) -> Vec<G2Affine> {
    let c = best_window(scalars.len() as u64);
    let msb_window = 1u64 << (c - 1);
    tracing::debug!(points = scalars.len(), window = c, "batch scalar multiplication");

    // table[i] = (i + 1) * base
    let mut table = Vec::with_capacity(1 << (c - 1));
    let mut acc = G2Jac::INFINITY;
    for _ in 0..(1usize << (c - 1)) {
        acc.add_mixed(base);
        table.push(acc);
    }

    let digits = partition_scalars(scalars, c);
    let selectors = selectors(c);

    let mut results = vec![G2Jac::INFINITY; scalars.len()];
    parallel::execute_mut(&mut results, |start, out| {
        let end = start + out.len();
        for (d, p) in digits[start..end].iter().zip(out.iter_mut()) {
            for (chunk, s) in selectors.iter().enumerate().rev() {
                if chunk != selectors.len() - 1 {
                    for _ in 0..c {
                        p.double_assign();
                    }
                }

                let bits = s.select(d);
                if bits == 0 {
                    continue;
                }
                if bits & msb_window == 0 {
                    p.add_assign(&table[(bits - 1) as usize]);
                } else {
                    let t = table[(bits & !msb_window) as usize].neg();
                    p.add_assign(&t);
                }
            }
        }
    });

    G2Jac::batch_to_affine(&results)
}
