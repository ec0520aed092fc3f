// ── Core error types ──
//
// User-facing errors from skyfare-core. Consumers never see raw HTTP
// statuses or JSON parse failures; `From<skyfare_api::Error>` translates
// transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the location service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<skyfare_api::Error> for CoreError {
    fn from(err: skyfare_api::Error) -> Self {
        match err {
            skyfare_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            skyfare_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            skyfare_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            skyfare_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            skyfare_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            skyfare_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            skyfare_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response from location service: {message}"),
                status: None,
            },
        }
    }
}

impl CoreError {
    /// Returns `true` for failures that a later retry might resolve.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Api {
                status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }
}
