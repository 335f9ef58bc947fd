//! Error types for the gtrends client
//!
//! The error taxonomy splits cleanly into two phases: validation errors,
//! raised before any network call is made, and request/response errors
//! raised while talking to the Trends service.

use thiserror::Error;

/// Unified error type for the gtrends crate
#[derive(Error, Debug)]
pub enum TrendsError {
    /// Malformed or out-of-range input, rejected before any network call
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Time string does not match any recognized range grammar
    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    /// Geo code not present in the country/subdivision reference table
    #[error("unknown geo code: {0:?}")]
    InvalidGeo(String),

    /// Category id not present in the category reference table
    #[error("unknown category id: {0}")]
    InvalidCategory(i32),

    /// Non-success HTTP status from the Trends service
    #[error("trends service returned HTTP {status}")]
    Remote { status: u16 },

    /// Response body did not match the expected envelope or schema
    #[error("malformed response: {0}")]
    Parse(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl TrendsError {
    /// Create an `InvalidArgument` error with a formatted message
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a `Parse` error with a formatted message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// True for errors raised by input validation, before any request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::InvalidTimeFormat(_)
                | Self::InvalidGeo(_)
                | Self::InvalidCategory(_)
        )
    }
}

/// Result type alias using the unified error type
pub type Result<T> = std::result::Result<T, TrendsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_split() {
        assert!(TrendsError::InvalidGeo("ZZ".into()).is_validation());
        assert!(TrendsError::InvalidCategory(99999).is_validation());
        assert!(!TrendsError::Remote { status: 429 }.is_validation());
        assert!(!TrendsError::parse("bad envelope").is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = TrendsError::InvalidTimeFormat("bogus".into());
        assert!(err.to_string().contains("bogus"));

        let err = TrendsError::Remote { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
