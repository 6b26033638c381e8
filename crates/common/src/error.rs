//! Error types shared across gaitrig crates.

use std::path::PathBuf;

/// Error type for file and configuration level gaitrig operations.
///
/// Domain failures (missing segment axes, unresolved traces) live in the
/// model and core crates.
#[derive(Debug, thiserror::Error)]
pub enum GaitrigError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using GaitrigError.
pub type GaitrigResult<T> = Result<T, GaitrigError>;

impl GaitrigError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_helper_formats_message() {
        let err = GaitrigError::config("axes must be two letters");
        assert_eq!(
            err.to_string(),
            "Configuration error: axes must be two letters"
        );
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GaitrigError = io.into();
        assert!(matches!(err, GaitrigError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
