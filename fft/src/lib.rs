//! Power-of-two evaluation domains over the BLS12-381 scalar field.
//!
//! A [`Domain`] precomputes per-stage twiddle factors and coset tables once,
//! in parallel, and is read-only afterwards, so it can be shared freely
//! across threads.

mod domain;
mod error;
mod fft;
mod field;

pub use domain::{bit_reverse, Domain};
pub use error::DomainError;
pub use field::FftField;
