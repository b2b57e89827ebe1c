//! Configuration and key file resolution.
//!
//! Configuration is loaded from an optional TOML file and merged with
//! environment variables prefixed with `REQUEST_AUTH__`. For example,
//! `REQUEST_AUTH__SIGNING__KEY_FILE` overrides `signing.key_file`.

use std::fs;
use std::path::{Path, PathBuf};

use request_auth_common::auth::RequestSigner;
use request_auth_common::settings::Settings;

use crate::error::CliError;

/// Loads settings from `file`, or from the environment alone when no file
/// is given.
pub(crate) fn load_settings(file: Option<&Path>) -> Result<Settings, CliError> {
    let content = match file {
        Some(path) => {
            log::debug!("Loading config from: {}", path.display());
            fs::read_to_string(path)?
        }
        None => String::new(),
    };

    Settings::from_toml(&content)
        .map_err(|e| CliError::Config(format!("Failed to load config: {:?}", e)))
}

/// The key file named on the command line wins over `signing.key_file`.
pub(crate) fn resolve_key_path(
    settings: &Settings,
    key: Option<&Path>,
) -> Result<PathBuf, CliError> {
    key.map(Path::to_path_buf)
        .or_else(|| settings.signing.key_file.as_ref().map(PathBuf::from))
        .ok_or(CliError::MissingKey)
}

/// Builds a signer from the resolved key file and the configured header
/// names.
pub(crate) fn load_signer(
    config: Option<&Path>,
    key: Option<&Path>,
) -> Result<RequestSigner, CliError> {
    let settings = load_settings(config)?;
    let key_path = resolve_key_path(&settings, key)?;
    log::debug!("Reading key from: {}", key_path.display());

    let pem = fs::read_to_string(&key_path)?;
    Ok(RequestSigner::from_pem(&pem, &settings.signing)?)
}

pub fn validate(file: &Path) -> Result<(), CliError> {
    let settings = load_settings(Some(file))?;

    println!("Configuration is valid: {}", file.display());
    println!("  key_id_header: {}", settings.signing.key_id_header);
    println!("  signature_header: {}", settings.signing.signature_header);
    match &settings.signing.key_file {
        Some(key_file) => println!("  key_file: {}", key_file),
        None => println!("  key_file: (not set)"),
    }
    Ok(())
}

pub fn show(file: &Path) -> Result<(), CliError> {
    let settings = load_settings(Some(file))?;
    let merged = settings
        .to_canonical_toml()
        .map_err(|e| CliError::Config(format!("Failed to serialize config: {:?}", e)))?;
    print!("{}", merged);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use request_auth_common::key::PrivateKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("should create temp file");
        file.write_all(content.as_bytes())
            .expect("should write temp file");
        file
    }

    #[test]
    fn test_resolve_key_path_prefers_argument() {
        let mut settings = Settings::default();
        settings.signing.key_file = Some("/etc/keys/from-config.pem".to_string());

        let path = resolve_key_path(&settings, Some(Path::new("/tmp/from-arg.pem")))
            .expect("should resolve");
        assert_eq!(path, PathBuf::from("/tmp/from-arg.pem"));

        let path = resolve_key_path(&settings, None).expect("should fall back to config");
        assert_eq!(path, PathBuf::from("/etc/keys/from-config.pem"));
    }

    #[test]
    fn test_resolve_key_path_missing() {
        let result = resolve_key_path(&Settings::default(), None);
        assert!(matches!(result, Err(CliError::MissingKey)));
    }

    #[test]
    fn test_load_signer_from_config_key_file() {
        let key = PrivateKey::generate();
        let key_file = write_temp(&key.to_pem());
        let config_file = write_temp(&format!(
            "[signing]\nkey_file = {:?}\nsignature_header = \"X-Sig\"\n",
            key_file.path().display().to_string()
        ));

        let signer = temp_env::with_var_unset("REQUEST_AUTH__SIGNING__KEY_FILE", || {
            load_signer(Some(config_file.path()), None)
        })
        .expect("should load signer");

        assert_eq!(signer.key_id(), key.key_identifier());
        assert_eq!(signer.headers().signature.as_str(), "x-sig");
    }

    #[test]
    fn test_load_settings_missing_file() {
        let result = load_settings(Some(Path::new("/nonexistent/racli.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_settings_invalid_header() {
        let config_file = write_temp("[signing]\nkey_id_header = \"bad header\"\n");
        let result = load_settings(Some(config_file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
