//! Multiplicative subgroups of power-of-two order and their precomputed
//! twiddle and coset tables.

use rayon::prelude::*;

use crate::error::DomainError;
use crate::field::FftField;

/// Roughly how many multiplications cost as much as one exponentiation.
const RATIO_EXP_MUL: usize = 6000 / 17;

/// Subgroup `<generator>` of order `cardinality`, a power of two.
///
/// All tables are built once by [`Domain::new`] and are read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain<F: FftField> {
    pub cardinality: u64,
    pub cardinality_inv: F,
    pub generator: F,
    pub generator_inv: F,
    /// Generator of `F^*`, the coset shift.
    pub multiplicative_gen: F,
    pub multiplicative_gen_inv: F,

    /// `twiddles[stage][j] = generator^(j * 2^stage)`, one table per FFT stage.
    pub twiddles: Vec<Vec<F>>,
    /// Same layout as `twiddles`, with `generator_inv`.
    pub twiddles_inv: Vec<Vec<F>>,

    /// `multiplicative_gen^j` for `j < cardinality`.
    pub coset_table: Vec<F>,
    /// `coset_table` in bit-reversed order.
    pub coset_table_reversed: Vec<F>,
    /// `multiplicative_gen_inv^j` for `j < cardinality`.
    pub coset_table_inv: Vec<F>,
    pub coset_table_inv_reversed: Vec<F>,
}

impl<F: FftField> Domain<F> {
    /// Smallest domain with at least `m` elements.
    ///
    /// # Panics
    ///
    /// When the size exceeds `2^TWO_ADICITY`; use [`Domain::try_new`] to get
    /// an error instead.
    pub fn new(m: u64) -> Self {
        match Self::try_new(m) {
            Ok(domain) => domain,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(m: u64) -> Result<Self, DomainError> {
        let too_large = |log_size| DomainError::TooLarge {
            size: m,
            log_size,
            max_log_size: F::TWO_ADICITY,
        };
        // above 2^63 the next power of two is 2^64
        let x = m.checked_next_power_of_two().ok_or_else(|| too_large(u64::BITS))?;
        let log_x = x.trailing_zeros();
        if log_x > F::TWO_ADICITY {
            return Err(too_large(log_x));
        }

        // order 2^TWO_ADICITY squared down to order x
        let mut generator = F::two_adic_root();
        for _ in 0..(F::TWO_ADICITY - log_x) {
            generator = generator * generator;
        }
        let multiplicative_gen = F::multiplicative_generator();

        tracing::debug!(cardinality = x, "precomputing fft domain");

        let mut domain = Domain {
            cardinality: x,
            cardinality_inv: F::from_u64(x).inverse(),
            generator,
            generator_inv: generator.inverse(),
            multiplicative_gen,
            multiplicative_gen_inv: multiplicative_gen.inverse(),
            twiddles: Vec::new(),
            twiddles_inv: Vec::new(),
            coset_table: Vec::new(),
            coset_table_reversed: Vec::new(),
            coset_table_inv: Vec::new(),
            coset_table_inv_reversed: Vec::new(),
        };
        domain.precompute_twiddles();
        domain.reverse_coset_tables();
        Ok(domain)
    }

    /// Number of FFT stages, `log2(cardinality)`.
    #[inline]
    pub fn log_cardinality(&self) -> u32 {
        self.cardinality.trailing_zeros()
    }

    fn precompute_twiddles(&mut self) {
        let n = self.cardinality as usize;
        let nb_stages = self.log_cardinality();
        let (g, g_inv) = (self.generator, self.generator_inv);
        let (mg, mg_inv) = (self.multiplicative_gen, self.multiplicative_gen_inv);

        let ((twiddles, twiddles_inv), (coset_table, coset_table_inv)) = rayon::join(
            || {
                rayon::join(
                    || stage_twiddles(nb_stages, g),
                    || stage_twiddles(nb_stages, g_inv),
                )
            },
            || {
                rayon::join(
                    || exp_table(mg, n),
                    || exp_table(mg_inv, n),
                )
            },
        );

        self.twiddles = twiddles;
        self.twiddles_inv = twiddles_inv;
        self.coset_table = coset_table;
        self.coset_table_inv = coset_table_inv;
    }

    fn reverse_coset_tables(&mut self) {
        self.coset_table_reversed = self.coset_table.clone();
        self.coset_table_inv_reversed = self.coset_table_inv.clone();
        bit_reverse(&mut self.coset_table_reversed);
        bit_reverse(&mut self.coset_table_inv_reversed);
    }
}

/// Twiddles for every stage; stage `i` holds `1 + 2^(nb_stages - i - 1)` powers.
fn stage_twiddles<F: FftField>(nb_stages: u32, omega: F) -> Vec<Vec<F>> {
    let mut t: Vec<Vec<F>> = Vec::with_capacity(nb_stages as usize);
    for i in 0..nb_stages {
        let len = 1 + (1usize << (nb_stages - i - 1));
        let w = match t.last() {
            Some(prev) => prev[2],
            None => omega,
        };
        let mut stage = Vec::with_capacity(len);
        stage.push(F::one());
        stage.push(w);
        for j in 2..len {
            let next = stage[j - 1] * w;
            stage.push(next);
        }
        t.push(stage);
    }
    t
}

/// `[1, w, w^2, ..., w^(n-1)]`, split across tasks when the table is large
/// enough to pay for one exponentiation per task.
fn exp_table<F: FftField>(w: F, n: usize) -> Vec<F> {
    let mut table = vec![F::one(); n];
    if n <= 1 {
        return table;
    }

    let cpus = rayon::current_num_threads();
    let interval = if cpus >= 4 { (n - 1) / (cpus / 4) } else { 0 };

    if interval < RATIO_EXP_MUL {
        exp_table_chunk(w, 1, &mut table[1..]);
        return table;
    }

    table[1..]
        .par_chunks_mut(interval)
        .enumerate()
        .for_each(|(i, chunk)| exp_table_chunk(w, (1 + i * interval) as u64, chunk));
    table
}

fn exp_table_chunk<F: FftField>(w: F, power: u64, table: &mut [F]) {
    if table.is_empty() {
        return;
    }
    table[0] = w.pow_u64(power);
    for i in 1..table.len() {
        table[i] = table[i - 1] * w;
    }
}

/// Bit-reversal permutation in place. `a.len()` must be a power of two.
pub fn bit_reverse<T>(a: &mut [T]) {
    let n = a.len();
    assert!(
        n.is_power_of_two() || n == 0,
        "bit_reverse needs a power-of-two length, got {n}"
    );
    if n <= 1 {
        return;
    }
    let nn = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let irev = i.reverse_bits() >> nn;
        if irev > i {
            a.swap(i, irev);
        }
    }
}
