//! CLI error types.

use std::fmt;

use error_stack::Report;
use request_auth_common::error::AuthError;

#[derive(Debug)]
pub enum CliError {
    /// Configuration file error
    Config(String),
    /// Key loading, signing or verification error
    Auth(Report<AuthError>),
    /// No key file given on the command line or in the settings
    MissingKey,
    /// Signature did not verify
    InvalidSignature,
    /// IO error
    Io(std::io::Error),
    /// JSON output error
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Auth(report) => write!(f, "{:?}", report),
            CliError::MissingKey => write!(
                f,
                "No key file given, pass --key or set signing.key_file in the config"
            ),
            CliError::InvalidSignature => write!(f, "Signature is not valid"),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<Report<AuthError>> for CliError {
    fn from(report: Report<AuthError>) -> Self {
        CliError::Auth(report)
    }
}
