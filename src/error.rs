use enough::StopReason;

/// Errors from BMP decoding, encoding and pixel operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed BMP: {0}")]
    Format(String),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedFormat(String),

    #[error("pixel buffer allocation failed: {0}")]
    Allocation(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
