/// Errors raised while expanding a message into field elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashToCurveError {
    /// The domain separation tag exceeds 255 bytes.
    #[error("domain separation tag is {0} bytes, at most 255 are allowed")]
    DstTooLong(usize),

    /// The requested output needs more than 255 digest blocks, or more than
    /// 65535 bytes.
    #[error("cannot expand to {0} bytes")]
    OutputTooLong(usize),
}
