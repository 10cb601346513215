/// Error types for the non-simulation parts of the core crate.
///
/// The engine itself never fails: bad dimensions and lengths are clamped,
/// and failed searches fall back to an ambient nudge.
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read, written, or its directory created.
    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid settings JSON.
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// `true` if the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Unrecognised screensaver command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("unknown argument: {0}")]
    UnknownFlag(String),

    #[error("preview mode requires a parent window handle")]
    MissingHandle,

    #[error("invalid window handle: {0}")]
    InvalidHandle(String),
}
