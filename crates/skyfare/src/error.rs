//! CLI error types with miette diagnostics.
//!
//! Maps core, form and config errors into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use skyfare_config::ConfigError;
use skyfare_core::{CoreError, FormError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const VALIDATION: i32 = 3;
    pub const AUTH: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the location service at {url}")]
    #[diagnostic(
        code(skyfare::connection_failed),
        help(
            "Check that the service is running and reachable.\n\
             Reason: {reason}\n\
             Override the address with --api-url or api.base_url in the config."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(skyfare::timeout),
        help("Increase the timeout with --timeout or api.timeout in the config.")
    )]
    Timeout { seconds: u64 },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(skyfare::auth_failed),
        help("Store a valid key with: skyfare config set-key\nOr set SKYFARE_API_KEY.")
    )]
    AuthFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Location service error: {message}")]
    #[diagnostic(code(skyfare::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Please fill all required fields: {missing}")]
    #[diagnostic(
        code(skyfare::missing_fields),
        help("Pass --from, --to, --depart and --class (or set search.default_cabin).")
    )]
    MissingFields { missing: String },

    #[error("Keyword '{keyword}' is too short")]
    #[diagnostic(
        code(skyfare::keyword_too_short),
        help("Type at least {min} characters to get suggestions.")
    )]
    KeywordTooShort { keyword: String, min: usize },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(skyfare::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(skyfare::config),
        help("Inspect the effective settings with: skyfare config show")
    )]
    Config(#[from] ConfigError),

    #[error("'{action}' needs an interactive terminal")]
    #[diagnostic(code(skyfare::not_interactive))]
    NotInteractive { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(skyfare::serialize))]
    Serialize(String),

    #[error("{0}")]
    #[diagnostic(code(skyfare::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::MissingFields { .. }
            | Self::KeywordTooShort { .. }
            | Self::Validation { .. } => exit_code::VALIDATION,
            Self::Config(_) => exit_code::CONFIG,
            Self::NotInteractive { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Api { message, status } => Self::Api { message, status },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Config { message } => Self::Config(ConfigError::Validation {
                field: "api".into(),
                reason: message,
            }),
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(v) => Self::MissingFields {
                missing: v.missing_list(),
            },
            FormError::Busy => Self::Internal(err.to_string()),
            FormError::DateInPast { .. } | FormError::BadDate { .. } => Self::Validation {
                field: "date".into(),
                reason: err.to_string(),
            },
            FormError::ReturnHidden | FormError::ReturnBeforeDeparture { .. } => {
                Self::Validation {
                    field: "return".into(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use skyfare_core::{RequiredField, ValidationError};

    use super::*;

    #[test]
    fn missing_fields_are_validation_failures() {
        let err: CliError = FormError::Invalid(ValidationError {
            missing: vec![RequiredField::Origin, RequiredField::CabinClass],
        })
        .into();
        assert_eq!(err.exit_code(), exit_code::VALIDATION);
        assert_eq!(
            err.to_string(),
            "Please fill all required fields: origin, cabin class"
        );
    }

    #[test]
    fn transport_failures_keep_their_codes() {
        let timeout: CliError = CoreError::Timeout { timeout_secs: 5 }.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused: CliError = CoreError::ConnectionFailed {
            url: "http://localhost:9".into(),
            reason: "refused".into(),
        }
        .into();
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn past_dates_name_the_field() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err: CliError = FormError::DateInPast { date, today: date }.into();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "date"));
    }
}
