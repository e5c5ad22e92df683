//! Error types for profile assembly and rendering.

use std::path::PathBuf;

use thiserror::Error;

use tabprof_model::ProfileError;

/// Errors that can occur while building, rendering or saving a profile.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Statistics could not be computed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Failed to write HTML.
    #[error("failed to write HTML: {source}")]
    Html {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON.
    #[error("failed to serialize profile: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to save the profile.
    #[error("failed to write profile to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Save {
            path: PathBuf::from("/tmp/profile.txt"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write profile to /tmp/profile.txt: disk full"
        );
    }

    #[test]
    fn test_error_from_profile() {
        let err: ReportError = ProfileError::invalid("bad").into();
        assert_eq!(err.to_string(), "invalid input: bad");
    }
}
