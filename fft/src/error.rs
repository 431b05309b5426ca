/// Errors raised when building an evaluation domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The requested size needs a root of unity of order `2^log_size`, but the
    /// field only has roots up to order `2^max_log_size`.
    #[error("m ({size}) is too big: the required root of unity does not exist (2^{log_size} > 2^{max_log_size})")]
    TooLarge {
        size: u64,
        log_size: u32,
        max_log_size: u32,
    },
}
