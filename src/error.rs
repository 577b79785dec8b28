//! Error types for dxfpath

use std::io;
use thiserror::Error;

/// Main error type for parse operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading the stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The tag stream itself is structurally damaged: a group code line that
    /// is not an integer, or a code line with no value line before EOF.
    /// Fatal for the whole parse.
    #[error("malformed tag stream at line {line}: {message}")]
    MalformedStream {
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with it
        message: String,
    },
}

/// Result type alias for dxfpath operations
pub type Result<T> = std::result::Result<T, DxfError>;

/// A numeric-group value that failed to parse.
///
/// Contained to the entity being assembled: the driver discards that entity,
/// records a notification, and keeps parsing. Never aborts the file.
#[derive(Debug, Clone, Error)]
#[error("group {code}: cannot parse numeric value '{value}'")]
pub struct MalformedNumber {
    /// The group code whose value failed to parse
    pub code: i32,
    /// The raw value string
    pub value: String,
}

impl MalformedNumber {
    pub(crate) fn new(code: i32, value: &str) -> Self {
        Self {
            code,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_display() {
        let err = DxfError::MalformedStream {
            line: 7,
            message: "group code 'LINE' is not an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed tag stream at line 7: group code 'LINE' is not an integer"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: DxfError = io_err.into();
        assert!(matches!(err, DxfError::Io(_)));
    }

    #[test]
    fn test_malformed_number_display() {
        let err = MalformedNumber::new(40, "abc");
        assert_eq!(err.to_string(), "group 40: cannot parse numeric value 'abc'");
    }
}
