//! Error types for field parsing and point decoding.

/// Errors raised when building a field element from external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The input string is not a decimal or `0x`-prefixed hexadecimal integer.
    #[error("invalid field element literal: {0:?}")]
    InvalidInput(String),

    /// The byte buffer does not have the fixed width of the field.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The encoded integer is not reduced, i.e. it is `>= q`.
    ///
    /// Canonical encodings are enforced so that every element has exactly one
    /// byte representation.
    #[error("value is not in canonical form (>= modulus)")]
    NonCanonical,
}

/// Errors raised when decoding a G2 point from its byte encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The buffer is shorter than the encoding announced by its metadata bits.
    #[error("short buffer: need {needed} bytes, got {actual}")]
    ShortBuffer { needed: usize, actual: usize },

    /// The metadata bits do not name one of the five valid encodings.
    #[error("invalid metadata bits {0:#05b}")]
    InvalidMetadata(u8),

    /// A coordinate is not in canonical form.
    #[error("coordinate is not in canonical form (>= modulus)")]
    NonCanonical,

    /// The infinity flag is set but the payload is not all zero.
    #[error("infinity encoding carries a non-zero payload")]
    NonZeroInfinity,

    /// A compressed X coordinate has no matching Y on the curve.
    ///
    /// This is distinct from a Y coordinate equal to zero: `x^3 + b` is a
    /// quadratic non-residue, so no point with this abscissa exists.
    #[error("invalid compressed coordinate: square root doesn't exist")]
    NoSquareRoot,
}

impl From<FieldError> for EncodingError {
    fn from(_: FieldError) -> Self {
        EncodingError::NonCanonical
    }
}
