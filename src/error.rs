//! Error types for the welcome application

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the settings binding, layout and page plumbing
#[derive(Debug, Error)]
pub enum WelcomeError {
    /// The settings schema is not installed or the store cannot be opened
    #[error("settings store unavailable: {0}")]
    StoreUnavailable(String),

    /// The schema exists but does not define the requested key
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Writing a value back to the store failed
    #[error("failed to write settings key {key}: {reason}")]
    StoreWrite { key: String, reason: String },

    /// Stylesheet could not be read
    #[error("failed to load stylesheet {path}: {source}")]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No stylesheet candidate exists
    #[error("no stylesheet found")]
    StylesheetMissing,

    /// Breakpoint condition literal could not be parsed
    #[error("invalid breakpoint condition '{0}'")]
    InvalidBreakpoint(String),

    /// A page identifier was registered twice
    #[error("duplicate page identifier: {0}")]
    DuplicatePage(String),
}

/// Result type alias for convenience
pub type WelcomeResult<T> = Result<T, WelcomeError>;

/// Error creation helpers
impl WelcomeError {
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        WelcomeError::StoreUnavailable(msg.into())
    }

    pub fn store_write(key: &str, reason: impl ToString) -> Self {
        WelcomeError::StoreWrite {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn stylesheet(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WelcomeError::Stylesheet {
            path: path.into(),
            source,
        }
    }
}
