//! Error types for the release bridge.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the release feed or the host.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// IO error (scratch file, config file, plugin header).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Release feed response could not be decoded.
    #[error("Failed to decode release feed: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Configuration is present but unusable.
    #[error("Invalid config: {0}")]
    Config(String),

    /// A host callback ran before the host reported the plugin identity.
    #[error("Plugin identity is not known yet")]
    MissingIdentity,

    /// Moving the extracted package into place failed.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BridgeError>;
