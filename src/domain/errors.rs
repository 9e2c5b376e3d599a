//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Why a raw evaluation request was rejected before reaching the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{0}' must be a number")]
    NonNumericValue(&'static str),

    #[error("Field '{0}' cannot be negative")]
    NegativeValue(&'static str),

    #[error("Field '{0}' must be true or false")]
    InvalidFlag(&'static str),

    #[error("Malformed request: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    Request(#[from] RequestError),

    #[error("Audit store error: {0}")]
    Audit(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        assert_eq!(
            RequestError::MissingField("ck_value").to_string(),
            "Missing required field: ck_value"
        );
        assert_eq!(
            RequestError::NegativeValue("bilirubin").to_string(),
            "Field 'bilirubin' cannot be negative"
        );
    }

    #[test]
    fn test_request_error_converts() {
        let err: DomainError = RequestError::NonNumericValue("transaminase").into();
        assert!(matches!(
            err,
            DomainError::Request(RequestError::NonNumericValue("transaminase"))
        ));
        assert!(err.to_string().starts_with("Invalid input:"));
    }
}
