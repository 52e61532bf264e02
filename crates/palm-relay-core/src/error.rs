//! Error types for the palm analysis relay.
//!
//! Every failure in the request path is a [`RelayError`]. Each variant maps to
//! exactly one HTTP status and JSON body at the handler boundary, so callers
//! never see a raw fault.

use thiserror::Error;

/// Errors raised while relaying a single analysis request.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Malformed or missing request input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any HTTP method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Missing credential or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success, unreachable, timed out, or unparseable upstream API
    #[error("Upstream error: {message}: {detail}")]
    Upstream {
        message: String,
        detail: String,
        status_code: Option<u16>,
    },

    /// Anything else, including panics inside the relay pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// The text placed in the `error` field of the JSON response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Configuration(msg) | Self::Internal(msg) => msg.clone(),
            Self::MethodNotAllowed => "Method Not Allowed".to_string(),
            Self::Upstream { message, .. } => message.clone(),
        }
    }
}

impl From<ConfigError> for RelayError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file (or a prompt file) from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for relay results.
pub type Result<T> = std::result::Result<T, RelayError>;
