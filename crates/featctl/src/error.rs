//! CLI error types with miette diagnostics.
//!
//! Maps core and API errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use featctl_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to registry at {url}")]
    #[diagnostic(
        code(featctl::connection_failed),
        help(
            "Check that the registry is running and accessible.\n\
             URL: {url}\n\
             Try: featctl features list --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS certificate verification failed for {url}")]
    #[diagnostic(
        code(featctl::tls_error),
        help(
            "The registry is using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { url: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(featctl::timeout),
        help("Increase timeout with --timeout or check registry responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Feature '{identifier}' not found")]
    #[diagnostic(
        code(featctl::not_found),
        help("Run: featctl features list to see available features")
    )]
    NotFound { identifier: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Registry rejected the request ({status}): {message}")]
    #[diagnostic(code(featctl::api_error))]
    ApiError { status: u16, message: String },

    #[error("Registry returned an unreadable response: {message}")]
    #[diagnostic(
        code(featctl::bad_response),
        help("The endpoint may not be a feature registry. Check the registry URL.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(featctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(featctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: featctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No registry configured")]
    #[diagnostic(
        code(featctl::no_config),
        help(
            "Create a profile with: featctl config init\n\
             Or pass --registry / set FEATCTL_REGISTRY.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(featctl::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(featctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(featctl::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<featctl_config::ConfigError> for CliError {
    fn from(err: featctl_config::ConfigError) -> Self {
        use featctl_config::ConfigError;
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

/// Translate a raw API error, attributing connection failures to `url`.
pub fn from_api_error(err: featctl_core::ApiError, url: &str) -> CliError {
    use featctl_core::ApiError;

    match err {
        ApiError::Api { status: 404, body } => CliError::NotFound {
            identifier: if body.is_empty() { "requested".into() } else { body },
        },
        ApiError::Api { status, body } => CliError::ApiError {
            status,
            message: body,
        },
        ApiError::Deserialization { message, .. } => CliError::BadResponse { message },
        ApiError::Tls(_) => CliError::TlsError { url: url.into() },
        ApiError::Transport(e) if e.is_timeout() => CliError::Timeout,
        ApiError::Transport(e) => CliError::ConnectionFailed {
            url: url.into(),
            source: Box::new(e),
        },
        ApiError::InvalidUrl(e) => CliError::Validation {
            field: "registry".into(),
            reason: e.to_string(),
        },
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::Api(api) => from_api_error(api, "(registry)"),
        }
    }
}
