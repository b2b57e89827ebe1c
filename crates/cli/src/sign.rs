//! Signing and verification commands.

use std::path::Path;

use http::HeaderMap;
use request_auth_common::signer::verify;

use crate::config::load_signer;
use crate::error::CliError;
use crate::OutputFormat;

fn render_headers(headers: &HeaderMap, format: &OutputFormat) -> Result<String, CliError> {
    let pairs = headers.iter().map(|(name, value)| {
        (
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
    });

    match format {
        OutputFormat::Text => Ok(pairs
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = pairs
                .map(|(name, value)| (name, serde_json::Value::String(value)))
                .collect();
            serde_json::to_string_pretty(&object).map_err(CliError::from)
        }
    }
}

/// Sign `message` and print the key id and signature headers.
pub fn sign_message(
    config: Option<&Path>,
    key: Option<&Path>,
    message: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let signer = load_signer(config, key)?;
    let headers = signer.auth_headers(message)?;
    println!("{}", render_headers(&headers, &format)?);
    Ok(())
}

pub fn verify_signature(public_key: &str, message: &str, signature: &str) -> Result<(), CliError> {
    if verify(public_key, message, signature)? {
        println!("Signature is valid");
        Ok(())
    } else {
        Err(CliError::InvalidSignature)
    }
}
