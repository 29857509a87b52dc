//! # Client Error Types
//!
//! Two families: [`RequestError`] for anything that goes wrong talking to the
//! backend, and [`ClientError`] for setting the client up.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  RequestError (every Store operation)    ClientError (setup)           │
//! │  ┌─────────────────────────────────┐     ┌─────────────────────────┐   │
//! │  │  Status     non-2xx response    │     │  InvalidConfig          │   │
//! │  │  Transport  connect / I/O       │     │  InvalidUrl             │   │
//! │  │  Malformed  body did not parse  │     │  ConfigLoadFailed       │   │
//! │  └─────────────────────────────────┘     │  ConfigSaveFailed       │   │
//! │                                          └─────────────────────────┘   │
//! │  A RequestError displays as its user-facing message only: either the   │
//! │  server's own `message` / `error` text or the operation's fallback.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client setup.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Request Errors
// =============================================================================

/// Failure of one backend request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },

    /// The response body did not have the expected shape.
    #[error("{message}")]
    Malformed { message: String },
}

impl RequestError {
    /// The message recorded in the slice's `error` field.
    pub fn message(&self) -> &str {
        match self {
            RequestError::Status { message, .. }
            | RequestError::Transport { message }
            | RequestError::Malformed { message } => message,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 answer.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

// =============================================================================
// Setup Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ClientError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::HttpClient(err.to_string())
    }
}
