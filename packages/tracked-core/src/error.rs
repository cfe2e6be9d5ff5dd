//! Tracking error types.

use thiserror::Error;

/// Errors raised at the boundaries of the tracking layer.
///
/// Overlay operations themselves are total; these only surface when
/// building an overlay from untyped input or loading configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Input could not be interpreted as a key-value record
    #[error("Expected a key-value record, got {found}")]
    NotARecord { found: &'static str },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Value could not be converted to or from its serialized form
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackError>;
