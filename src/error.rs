//! Error types for theme toolkit operations.

use thiserror::Error;

/// Primary error type for theme operations.
#[derive(Error, Debug)]
pub enum ThemeError {
    // Resource errors
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    // Image errors
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    // Archive errors
    #[error("Archive error: {0}")]
    Archive(String),

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification used by callers that only care about the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidFormat,
    Io,
    Other,
}

impl ThemeError {
    /// Shorthand for a [`ThemeError::NotFound`] built from a path.
    pub fn not_found(path: &std::path::Path) -> Self {
        Self::NotFound {
            path: path.display().to_string(),
        }
    }

    /// Returns the failure family of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::ConfigNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidFormat(_) | Self::ConfigParse(_) | Self::Json(_) => {
                ErrorKind::InvalidFormat
            }
            Self::Io(_) => ErrorKind::Io,
            Self::ImageProcessing(_) | Self::Archive(_) | Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidFormat(_)
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("Check the path and try again"),
            Self::InvalidFormat(_) => {
                Some("Make sure the file is a .smtheme bundle or a valid project file")
            }
            Self::ConfigNotFound { .. } => Some("Run: ltk config --path"),
            Self::ConfigParse(_) => Some("Fix the configuration file syntax"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using ThemeError.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| ThemeError::Other(format!("{}: {e}", f().into())))
    }
}
