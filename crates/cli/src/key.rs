//! Key inspection and generation commands.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use request_auth_common::key::{PrivateKey, CURVE_BIT_SIZE};

use crate::config::load_signer;
use crate::error::CliError;
use crate::OutputFormat;

fn render_inspect(key: &PrivateKey, format: &OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Curve: secp256k1 ({} bit)\nKey id: {}\nPublic key: {}",
            CURVE_BIT_SIZE,
            key.key_identifier(),
            key.public_key_hex()
        )),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "curve": "secp256k1",
                "key_id": key.key_identifier(),
                "public_key": key.public_key_hex(),
            });
            serde_json::to_string_pretty(&output).map_err(CliError::from)
        }
    }
}

/// Show the key identifier and public key of a PEM key file.
pub fn inspect(
    config: Option<&Path>,
    key: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let signer = load_signer(config, key)?;
    println!("{}", render_inspect(signer.key(), &format)?);
    Ok(())
}

pub fn print_id(config: Option<&Path>, key: Option<&Path>) -> Result<(), CliError> {
    let signer = load_signer(config, key)?;
    println!("{}", signer.key_id());
    Ok(())
}

/// Creates `path` for writing key material. Fails if it already exists; on
/// unix the file is readable by the owner only.
fn create_key_file(path: &Path) -> std::io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Generate a new key and write it as PEM.
///
/// Refuses to overwrite an existing file.
pub fn generate(output: Option<&Path>) -> Result<(), CliError> {
    let key = PrivateKey::generate();
    let pem = key.to_pem();

    match output {
        Some(path) => {
            let mut file = create_key_file(path)?;
            file.write_all(pem.as_bytes())?;
            log::info!("Wrote key {} to {}", key.key_identifier(), path.display());
            println!("{}", key.key_identifier());
        }
        None => print!("{}", pem),
    }

    Ok(())
}
