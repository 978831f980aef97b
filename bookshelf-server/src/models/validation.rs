//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Path parameter is not a valid identifier
    InvalidId { value: String },

    /// Request body could not be parsed
    MalformedBody { reason: String },

    /// Query string could not be parsed
    MalformedQuery { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { value } => write!(f, "invalid id: '{}'", value),
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
            Self::MalformedQuery { reason } => write!(f, "malformed query string: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidId {
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "invalid id: 'abc'");

        let err = ValidationError::MalformedBody {
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().starts_with("malformed request body"));
    }
}
