//! SBI Error Types

use thiserror::Error;

/// Errors raised by the SBI transport plumbing.
#[derive(Error, Debug)]
pub enum SbiError {
    /// Invalid URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// TLS/SSL error
    #[error("TLS error: {0}")]
    TlsError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for SBI operations
pub type SbiResult<T> = Result<T, SbiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SbiError::TlsError("no certificate".to_string());
        assert_eq!(err.to_string(), "TLS error: no certificate");
    }
}
