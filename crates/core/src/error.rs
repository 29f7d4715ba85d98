//! Error types for the pssvg conversion library.
//!
//! Interpretation itself never fails: malformed programs degrade into
//! default operands and diagnostic comments. The errors below surface only
//! at the I/O boundary, plus the reserved categories kept for callers that
//! want to classify problems themselves.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for conversion operations.
#[derive(Error, Debug)]
pub enum PsSvgError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("conversion error: {0}")]
    ConversionError(String),

    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),
}

impl PsSvgError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience Result type alias for PsSvgError.
pub type Result<T> = std::result::Result<T, PsSvgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = PsSvgError::io(
            "missing.ps",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.ps"));
        assert!(msg.contains("gone"));
    }
}
