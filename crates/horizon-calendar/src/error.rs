//! Error types for calendar configuration.
//!
//! The engine itself has no failure modes: bad dates degrade to defaults and
//! disabled activations are no-ops. Errors only arise when loading host
//! configuration.

use std::path::PathBuf;

/// Result type alias for calendar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading calendar configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML syntax or shape error.
    #[error("invalid calendar configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error("failed to serialize calendar configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("failed to read calendar configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Week start outside 0 (Sunday) ..= 6 (Saturday).
    #[error("week start must be 0 (Sunday) to 6 (Saturday), got {0}")]
    InvalidWeekStart(u8),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
