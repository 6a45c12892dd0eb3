//! Error types for graun_sifter.
//!
//! Failures fall into four groups:
//! - configuration problems, raised before any network I/O
//! - transport failures on either the search request or the queue call
//! - data shape errors when the search API returns something unexpected
//! - local I/O while reading config or message files
//!
//! Entries the queue service rejects inside an accepted batch are not errors;
//! they come back as data in [`crate::models::BatchResponse::failed`].

use thiserror::Error;

/// Result type alias for graun_sifter operations
pub type Result<T> = std::result::Result<T, SifterError>;

/// Main error type for graun_sifter
#[derive(Debug, Error)]
pub enum SifterError {
    /// No API key was passed explicitly and none was configured
    #[error("missing Guardian API key: pass one explicitly or set {var}")]
    MissingApiKey {
        /// The environment variable that was consulted
        var: &'static str,
    },

    /// Invalid configuration value
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the bad setting
        message: String,
    },

    /// Search request failed (connection, timeout or non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Search response or messages file did not have the expected shape
    #[error("unexpected JSON shape: {0}")]
    Parse(#[source] serde_json::Error),

    /// An article could not be serialized into a message body
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The queue service call failed as a whole
    #[error("queue error: {0}")]
    Queue(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config file could not be parsed
    #[error("config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SifterError {
    /// Shorthand for a [`SifterError::Config`]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error was raised before any network call was attempted
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. } | Self::Config { .. } | Self::Yaml(_)
        )
    }
}
