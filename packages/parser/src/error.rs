//! Error types for the parser.
//!
//! Hard errors cover caller-contract violations only (bad regulation ids,
//! bad article numbers). Everything that goes wrong *inside* a parse run is
//! recovered and reported as an [`crate::anomaly::Anomaly`], never as an
//! error, so a single malformed article cannot block the rest of a statute.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Invalid regulation identifier format.
    #[error("Invalid regulation id: '{0}'. Expected '<tier> <number>/<year>' (e.g., UU 13/2003)")]
    InvalidRegulationId(String),

    /// Invalid article number format.
    #[error("Invalid article number: '{0}'. Expected digits with an optional letter suffix (e.g., 14 or 14A)")]
    InvalidArticleNumber(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_regulation_id_display() {
        let err = ParseError::InvalidRegulationId("UU13".to_string());
        assert!(err.to_string().contains("UU13"));
        assert!(err.to_string().contains("UU 13/2003"));
    }

    #[test]
    fn test_invalid_article_number_display() {
        let err = ParseError::InvalidArticleNumber("abc".to_string());
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("14A"));
    }
}
