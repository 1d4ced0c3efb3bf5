//! Error handling module for the court dashboard client.
//!
//! Provides the crate-wide error type, its classification into the failure taxonomy
//! pages branch on, and parsing of the backend's structured error envelope.

use serde::Deserialize;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const REJECTED: &str = "REJECTED";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
}

/// Failure classes a page can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Session invalid; the user is sent back to login.
    Authentication,
    /// Backend failed (status >= 500).
    Server,
    /// Backend refused the request (4xx other than 401).
    Validation,
    /// No response was received.
    Transport,
    /// Failure on this side of the wire (decode, config, storage, input).
    Client,
}

/// Client error type.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Status 401
    Unauthorized(String),
    /// Status >= 500
    Server { status: u16, message: String },
    /// Any other non-success status
    Rejected { status: u16, message: String },
    /// Connection, timeout or other failure before a response arrived
    Transport(String),
    /// Response body did not match the expected shape
    Decode(String),
    /// Invalid configuration value
    Config(String),
    /// Token storage failure
    Storage(String),
    /// Input refused before any request was made
    InvalidInput(String),
}

impl ClientError {
    /// Get the HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Unauthorized(_) => codes::UNAUTHORIZED,
            ClientError::Server { .. } => codes::SERVER_ERROR,
            ClientError::Rejected { .. } => codes::REJECTED,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::InvalidInput(_) => codes::INVALID_INPUT,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Unauthorized(msg) => msg.clone(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Config(msg) => msg.clone(),
            ClientError::Storage(msg) => msg.clone(),
            ClientError::InvalidInput(msg) => msg.clone(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unauthorized(_) => ErrorKind::Authentication,
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::Rejected { .. } => ErrorKind::Validation,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Decode(_)
            | ClientError::Config(_)
            | ClientError::Storage(_)
            | ClientError::InvalidInput(_) => ErrorKind::Client,
        }
    }

    /// Whether the query layer may attempt the request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Server | ErrorKind::Transport)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Invalid response body: {}", err))
        } else {
            ClientError::Transport(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        ClientError::Storage(format!("Storage error: {}", err))
    }
}

/// Error envelope returned by the backend: `{"detail": ...}`.
///
/// `detail` is a plain string for business errors and a list of
/// `{"loc": [...], "msg": "..."}` objects for request validation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body, returning `None` when it is not the structured envelope.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The human-readable message carried by the envelope.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}
