//! Error types for profiling operations.

use thiserror::Error;

use crate::dtype::SemanticType;

/// Errors raised by the profiling core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    /// Input has the wrong shape or type for the requested operation.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Distribution statistics requested for a type that has none.
    #[error("distribution statistics are not supported for dtype {dtype}")]
    UnsupportedType { dtype: SemanticType },
}

impl ProfileError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for profiling operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
