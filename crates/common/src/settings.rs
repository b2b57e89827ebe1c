//! Signing configuration.
//!
//! Settings come from TOML merged with environment variables prefixed with
//! `REQUEST_AUTH__`, e.g. `REQUEST_AUTH__SIGNING__KEY_FILE=/etc/keys/api.pem`
//! overrides `signing.key_file`.

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use http::HeaderName;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AuthError;

pub const ENVIRONMENT_PREFIX: &str = "REQUEST_AUTH";
pub const DEFAULT_KEY_ID_HEADER: &str = "X-Key-Id";
pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Signature";

fn default_key_id_header() -> String {
    DEFAULT_KEY_ID_HEADER.to_string()
}

fn default_signature_header() -> String {
    DEFAULT_SIGNATURE_HEADER.to_string()
}

fn validate_header_name(name: &str) -> Result<(), ValidationError> {
    HeaderName::from_bytes(name.as_bytes())
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_header_name"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Signing {
    /// Path of the PEM key file. Reading it is up to the caller.
    #[serde(default)]
    pub key_file: Option<String>,
    #[serde(default = "default_key_id_header")]
    #[validate(custom(function = "validate_header_name"))]
    pub key_id_header: String,
    #[serde(default = "default_signature_header")]
    #[validate(custom(function = "validate_header_name"))]
    pub signature_header: String,
}

impl Default for Signing {
    fn default() -> Self {
        Self {
            key_file: None,
            key_id_header: default_key_id_header(),
            signature_header: default_signature_header(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub signing: Signing,
}

impl Settings {
    /// Parses `toml_str`, applies environment overrides and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] for invalid TOML, wrong value
    /// types or header names that are not valid HTTP header names.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AuthError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_PREFIX)
            .separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AuthError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(AuthError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(AuthError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Renders the effective settings, environment overrides included.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if serialization fails.
    pub fn to_canonical_toml(&self) -> Result<String, Report<AuthError>> {
        toml::to_string(self).change_context(AuthError::Configuration {
            message: "Failed to serialize settings".to_string(),
        })
    }
}
