//! ECDSA-SHA256 signing and verification over secp256k1.
//!
//! - Sign: SHA256(message) → RFC 6979 deterministic ECDSA → r‖s (64 bytes)
//!   → base64
//! - Verify: base64 → r‖s, hex → public point, SHA256(message) → ECDSA verify
//!
//! Signatures use the fixed-width r‖s layout, not DER. Each half is 32 bytes,
//! big-endian, zero-padded.

use base64::{engine::general_purpose, Engine};
use error_stack::{Report, ResultExt};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::codec::hex_to_bytes;
use crate::error::AuthError;
use crate::key::{PrivateKey, CURVE_BYTE_LENGTH};

/// Length of a decoded signature: r and s, one curve width each.
pub const SIGNATURE_LENGTH: usize = 2 * CURVE_BYTE_LENGTH;

/// Signs the UTF-8 bytes of `message` and returns the base64 r‖s signature.
///
/// The nonce is derived per RFC 6979, so the same key and message always
/// produce the same signature.
///
/// # Errors
///
/// Returns [`AuthError::Signing`] if the ECDSA primitive fails.
pub fn sign(key: &PrivateKey, message: &str) -> Result<String, Report<AuthError>> {
    let digest = Sha256::digest(message.as_bytes());
    let signature: Signature = key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|e| Report::new(AuthError::signing(format!("ECDSA signing failed: {e}"))))?;

    let signature_bytes = signature.to_bytes();
    debug_assert_eq!(signature_bytes.len(), SIGNATURE_LENGTH);

    Ok(general_purpose::STANDARD.encode(signature_bytes))
}

/// Checks a base64 r‖s signature over `message` against an uncompressed
/// public key given as X‖Y hex.
///
/// # Errors
///
/// Returns [`AuthError::Format`] for malformed hex or base64 and
/// [`AuthError::Signing`] for a public key that is not a curve point or a
/// signature of the wrong length.
pub fn verify(
    public_key_hex: &str,
    message: &str,
    signature_b64: &str,
) -> Result<bool, Report<AuthError>> {
    let coordinates = hex_to_bytes(public_key_hex).attach("while decoding the public key")?;
    if coordinates.len() != SIGNATURE_LENGTH {
        return Err(Report::new(AuthError::signing(format!(
            "public key must be {SIGNATURE_LENGTH} bytes, got {}",
            coordinates.len()
        ))));
    }
    let mut sec1 = Vec::with_capacity(1 + coordinates.len());
    sec1.push(0x04);
    sec1.extend_from_slice(&coordinates);
    let verifying_key = VerifyingKey::from_sec1_bytes(&sec1)
        .map_err(|_| Report::new(AuthError::signing("public key is not a point on secp256k1")))?;

    let signature_bytes = general_purpose::STANDARD.decode(signature_b64).map_err(|e| {
        Report::new(AuthError::format(format!("Failed to decode signature: {e}")))
    })?;
    if signature_bytes.len() != SIGNATURE_LENGTH {
        return Err(Report::new(AuthError::signing(format!(
            "Signature must be {SIGNATURE_LENGTH} bytes, got {}",
            signature_bytes.len()
        ))));
    }
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        // r or s of zero or beyond the group order can never verify.
        return Ok(false);
    };

    let digest = Sha256::digest(message.as_bytes());
    Ok(verifying_key.verify_prehash(&digest, &signature).is_ok())
}
