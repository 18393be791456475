//! CLI error types with miette diagnostics.
//!
//! Maps `owlet_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(owlet::auth_failed),
        help(
            "The Owlet cloud rejected the login.\n\
             Verify your email and password, then run: owlet config init\n\
             Details: {message}"
        )
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(
        code(owlet::session_expired),
        help("The session could not be refreshed. Re-run the command to log in again.")
    )]
    SessionExpired,

    #[error("No credentials configured")]
    #[diagnostic(
        code(owlet::no_credentials),
        help(
            "Configure credentials with: owlet config init\n\
             Or set OWLET_EMAIL and OWLET_PASSWORD environment variables."
        )
    )]
    NoCredentials,

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Owlet cloud")]
    #[diagnostic(
        code(owlet::connection_failed),
        help("Check your network connection and try again.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(owlet::timeout),
        help("Increase the timeout with --timeout or check your connection.")
    )]
    Timeout { seconds: u64 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Owlet API error (HTTP {status}): {message}")]
    #[diagnostic(code(owlet::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response from the Owlet cloud: {message}")]
    #[diagnostic(
        code(owlet::bad_response),
        help("The vendor may have changed the API. Re-run with -vv for the raw exchange.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(owlet::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(owlet::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::SessionExpired | Self::NoCredentials => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Wrap a transport error, splitting out timeouts.
    pub fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                seconds: timeout_secs,
            }
        } else {
            Self::ConnectionFailed { source: err }
        }
    }
}

// ── owlet_api::Error → CliError mapping ──────────────────────────────

impl From<owlet_api::Error> for CliError {
    fn from(err: owlet_api::Error) -> Self {
        match err {
            owlet_api::Error::Authentication { message } => CliError::AuthFailed { message },

            owlet_api::Error::SessionExpired => CliError::SessionExpired,

            owlet_api::Error::Api { status, message } => CliError::Api { status, message },

            owlet_api::Error::Transport(e) => CliError::ConnectionFailed { source: e },

            owlet_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },

            owlet_api::Error::Deserialization { message, .. } => {
                CliError::BadResponse { message }
            }
        }
    }
}
