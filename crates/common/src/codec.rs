//! Conversions between big-endian bytes, unsigned integers and hex strings.

use error_stack::Report;

use crate::error::AuthError;

/// Interprets `bytes` as a big-endian unsigned integer.
///
/// No sign handling is done; callers reject negative DER encodings before
/// getting here. Leading zero bytes are accepted.
///
/// # Errors
///
/// Returns [`AuthError::Der`] if the value does not fit in a `u64`.
pub fn bytes_to_uint(bytes: &[u8]) -> Result<u64, Report<AuthError>> {
    bytes.iter().try_fold(0u64, |acc, &byte| {
        if acc >> 56 != 0 {
            return Err(Report::new(AuthError::der(format!(
                "integer of {} bytes does not fit in 64 bits",
                bytes.len()
            ))));
        }
        Ok((acc << 8) | u64::from(byte))
    })
}

/// Parses a hex string (either case) into bytes.
///
/// # Errors
///
/// Returns [`AuthError::Format`] for odd-length input or non-hex characters.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, Report<AuthError>> {
    hex::decode(hex)
        .map_err(|e| Report::new(AuthError::format(format!("invalid hex string: {e}"))))
}

/// Formats bytes as lowercase hex, two digits per byte.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
