//! QFlow error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or building QFlow widgets
#[derive(Error, Debug)]
pub enum QFlowError {
    /// Notification type with no icon/progress bar style
    #[error("The type does not exist in Notify: '{0}'")]
    UnknownType(String),

    /// Theme color with no frame/label style
    #[error("The color does not exist in Notify: '{0}'")]
    UnknownColor(String),

    /// Screen corner that notifications cannot be anchored to
    #[error("The position does not exist in Notify: '{0}'")]
    UnknownPosition(String),

    /// Malformed hex color literal
    #[error("Invalid hex color: '{0}'")]
    InvalidColor(String),

    /// Icon resource missing from the resolver
    #[error("Icon not found: {0}")]
    IconNotFound(String),

    /// Failed to read a resource from disk
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for QFlow operations
pub type Result<T> = std::result::Result<T, QFlowError>;
