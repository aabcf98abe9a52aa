//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field is missing or empty
    Empty { field: &'static str },

    /// Request body could not be decoded in the negotiated wire format
    InvalidBody { format: &'static str, reason: String },

    /// Query string could not be parsed
    InvalidQuery { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidBody { format, reason } => {
                write!(f, "invalid {} body: {}", format, reason)
            }
            Self::InvalidQuery { reason } => write!(f, "invalid query string: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
