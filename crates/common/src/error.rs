//! Error types for key loading and request signing.
//!
//! Every fallible operation in this crate returns
//! `Result<T, Report<AuthError>>`. The variant names the failing layer; the
//! report carries the attached context describing where it happened.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// Malformed hex, base64 or unbalanced PEM markers.
    #[display("Format error: {message}")]
    Format { message: String },

    /// The requested PEM label does not appear in the text.
    #[display("PEM section not found: {label}")]
    PemSectionNotFound { label: String },

    /// Any ASN.1 structural violation.
    #[display("DER error: {message}")]
    Der { message: String },

    /// The DER is well formed but is not a supported EC private key.
    #[display("Key format error: {message}")]
    KeyFormat { message: String },

    #[display("Signing error: {message}")]
    Signing { message: String },

    #[display("Configuration error: {message}")]
    Configuration { message: String },
}

impl AuthError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub(crate) fn der(message: impl Into<String>) -> Self {
        Self::Der {
            message: message.into(),
        }
    }

    pub(crate) fn key_format(message: impl Into<String>) -> Self {
        Self::KeyFormat {
            message: message.into(),
        }
    }

    pub(crate) fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::format("odd length").to_string(),
            "Format error: odd length"
        );
        assert_eq!(
            AuthError::PemSectionNotFound {
                label: "EC PRIVATE KEY".into()
            }
            .to_string(),
            "PEM section not found: EC PRIVATE KEY"
        );
        assert_eq!(
            AuthError::der("wrong tag").to_string(),
            "DER error: wrong tag"
        );
        assert_eq!(
            AuthError::key_format("bad version").to_string(),
            "Key format error: bad version"
        );
        assert_eq!(
            AuthError::Configuration {
                message: "missing".into()
            }
            .to_string(),
            "Configuration error: missing"
        );
    }
}
