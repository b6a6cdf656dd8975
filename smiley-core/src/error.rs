//! Error types shared by every smiley crate.

use thiserror::Error;

/// Errors that can occur when talking to a smileycoin daemon.
#[derive(Debug, Error)]
pub enum SmileyError {
    /// The HTTP request could not be completed (connection refused, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with a non-success status and no JSON-RPC error object.
    #[error("HTTP {status} from daemon: {body}")]
    HttpStatus { status: u16, body: String },

    /// The daemon reported a JSON-RPC error.
    #[error("daemon error: {message} (code: {code})")]
    Daemon { code: i64, message: String },

    /// The response carried neither `result` nor `error`.
    #[error("missing result in response to {method}")]
    MissingResult { method: String },

    /// A call wrapper rejected its own arguments before sending.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Starting, finding, or stopping the daemon process failed.
    #[error("process error: {0}")]
    Process(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SmileyError {
    /// Whether the error originated in the daemon rather than the transport.
    pub fn is_daemon_error(&self) -> bool {
        matches!(self, Self::Daemon { .. })
    }
}

/// Result type for smiley operations.
pub type Result<T> = std::result::Result<T, SmileyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daemon_error_display() {
        let err = SmileyError::Daemon {
            code: -5,
            message: "Invalid Smileycoin address".to_string(),
        };
        assert_eq!(err.to_string(), "daemon error: Invalid Smileycoin address (code: -5)");
        assert!(err.is_daemon_error());
    }

    #[test]
    fn test_status_error_is_not_daemon_error() {
        let err = SmileyError::HttpStatus {
            status: 401,
            body: String::new(),
        };
        assert!(!err.is_daemon_error());
    }
}
