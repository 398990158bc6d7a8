//! Error types.

/// Errors reported by filter construction, combination and decoding.
///
/// Every check happens before the filter is touched, so a failed operation never leaves a
/// partially modified filter behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested buffer size is not a positive number of bytes.
    #[error("filter size must be a positive number of bytes, got {0}")]
    InvalidSize(usize),

    /// Two filters with different sizes were combined or compared.
    #[error("instances do not have equivalent lengths (left={left}, right={right})")]
    SizeMismatch {
        /// Size of the left-hand filter in bytes.
        left: usize,
        /// Size of the right-hand filter in bytes.
        right: usize,
    },

    /// The textual form is not valid base64.
    #[error("filter text is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Result type used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            Error::InvalidSize(0).to_string(),
            "filter size must be a positive number of bytes, got 0"
        );
        assert_eq!(
            Error::SizeMismatch { left: 4, right: 8 }.to_string(),
            "instances do not have equivalent lengths (left=4, right=8)"
        );
    }

    #[test]
    fn from_decode_error() {
        let err: Error = base64::DecodeError::InvalidLength(3).into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
