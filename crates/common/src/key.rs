//! secp256k1 private keys.
//!
//! Keys arrive as an RFC 5915 `ECPrivateKey` in PEM or DER form, as a raw
//! scalar, or as hex. The loader only understands the layout OpenSSL writes
//! for `openssl ecparam -name secp256k1 -genkey`:
//!
//! ```text
//! ECPrivateKey ::= SEQUENCE {
//!   version        INTEGER { ecPrivkeyVer1(1) },
//!   privateKey     OCTET STRING,
//!   parameters [0] ECParameters {{ NamedCurve }},
//!   publicKey  [1] BIT STRING OPTIONAL
//! }
//! ```

use std::fmt;

use error_stack::{Report, ResultExt};
use k256::ecdsa::{SigningKey, VerifyingKey};
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use sha1::{Digest, Sha1};

use crate::codec::{bytes_to_hex, hex_to_bytes};
use crate::der::{read_constructed, read_integer, read_object, read_octet_string, read_sequence};
use crate::der_writer::{
    encode_bit_string, encode_constructed, encode_integer, encode_octet_string, encode_sequence,
};
use crate::error::AuthError;
use crate::oid::ObjectIdentifier;
use crate::pem::{encode_pem, get_pem_section};

pub const CURVE_BIT_SIZE: usize = 256;
pub const CURVE_BYTE_LENGTH: usize = (CURVE_BIT_SIZE + 7) / 8;

pub const EC_PARAMETERS_LABEL: &str = "EC PARAMETERS";
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

const EC_PRIVATE_KEY_VERSION: u64 = 1;
const PARAMETERS_TAG: u8 = 0;
const PUBLIC_KEY_TAG: u8 = 1;
const SEQUENCE_TAG: u8 = 0x30;
const UNCOMPRESSED_POINT_PREFIX: u8 = 0x04;
/// DER encoding of the secp256k1 curve identifier, `06 05 2B 81 04 00 0A`.
const SECP256K1_OID_DER: [u8; 7] = [0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a];

/// A private scalar, big-endian and left-padded to the curve byte length.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyMaterial([u8; CURVE_BYTE_LENGTH]);

impl PrivateKeyMaterial {
    /// Left-pads `scalar` with zero bytes to [`CURVE_BYTE_LENGTH`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::KeyFormat`] if `scalar` is longer than the curve
    /// byte length.
    pub fn from_scalar_bytes(scalar: &[u8]) -> Result<Self, Report<AuthError>> {
        if scalar.len() > CURVE_BYTE_LENGTH {
            return Err(Report::new(AuthError::key_format(format!(
                "private key scalar is {} bytes, expected at most {CURVE_BYTE_LENGTH}",
                scalar.len()
            ))));
        }
        let mut bytes = [0u8; CURVE_BYTE_LENGTH];
        bytes[CURVE_BYTE_LENGTH - scalar.len()..].copy_from_slice(scalar);
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CURVE_BYTE_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyMaterial([REDACTED])")
    }
}

fn key_format_error(message: impl Into<String>) -> Report<AuthError> {
    Report::new(AuthError::key_format(message))
}

/// Extracts the private scalar from an RFC 5915 `ECPrivateKey`.
///
/// # Errors
///
/// Returns [`AuthError::KeyFormat`] on trailing data, a version other than
/// 1, a nested wrapper `SEQUENCE`, missing curve parameters, a curve other
/// than secp256k1 or an oversized scalar. Underlying DER errors are kept in
/// the report.
pub fn load_key_from_der(der: &[u8]) -> Result<PrivateKeyMaterial, Report<AuthError>> {
    let sequence = read_sequence(der)
        .change_context(AuthError::key_format("private key is not a DER SEQUENCE"))?;
    if !sequence.rest.is_empty() {
        return Err(key_format_error(format!(
            "trailing junk after DER privkey: {}",
            bytes_to_hex(sequence.rest)
        )));
    }

    let version = read_integer(sequence.value)
        .change_context(AuthError::key_format("unable to read private key version"))?;
    if version.value != EC_PRIVATE_KEY_VERSION {
        return Err(key_format_error(format!(
            "expected version '1' at start of DER privkey, got {}",
            version.value
        )));
    }

    if version.rest.first() == Some(&SEQUENCE_TAG) {
        return Err(key_format_error(
            "AsymmetricKeyPackage wrapped keys are not supported",
        ));
    }

    let scalar = read_octet_string(version.rest)
        .change_context(AuthError::key_format("unable to read private key scalar"))?;

    let parameters = read_constructed(scalar.rest)
        .change_context(AuthError::key_format("unable to read curve parameters"))?;
    if parameters.value.tag != PARAMETERS_TAG {
        return Err(key_format_error(format!(
            "expected tag 0 in DER privkey, got {}",
            parameters.value.tag
        )));
    }

    read_curve(parameters.value.content, "curve parameters")?;

    if !parameters.rest.is_empty() {
        log::debug!(
            "ignoring {} bytes of optional fields after curve parameters",
            parameters.rest.len()
        );
    }

    PrivateKeyMaterial::from_scalar_bytes(scalar.value)
}

/// Reads the curve OID filling all of `content` and checks it is secp256k1.
fn read_curve(content: &[u8], location: &str) -> Result<(), Report<AuthError>> {
    let curve = read_object(content).change_context(AuthError::key_format(format!(
        "unable to read curve identifier in {location}"
    )))?;
    if !curve.rest.is_empty() {
        return Err(key_format_error(format!(
            "trailing junk after curve OID in {location}: {}",
            bytes_to_hex(curve.rest)
        )));
    }
    ensure_secp256k1(&curve.value)
}

fn ensure_secp256k1(curve: &ObjectIdentifier) -> Result<(), Report<AuthError>> {
    if *curve != ObjectIdentifier::secp256k1() {
        return Err(key_format_error(format!(
            "curve with OID {curve} is not supported, expected {}",
            ObjectIdentifier::secp256k1()
        )));
    }
    Ok(())
}

/// Loads the private scalar from PEM text holding an optional
/// `EC PARAMETERS` section and a required `EC PRIVATE KEY` section.
///
/// A missing `EC PARAMETERS` section is fine. A present but malformed one
/// fails the load.
///
/// # Errors
///
/// Returns [`AuthError::Format`] for unbalanced markers or bad base64,
/// [`AuthError::KeyFormat`] for a curve mismatch, a missing private key or
/// any error from [`load_key_from_der`].
pub fn load_key_from_pem(text: &str) -> Result<PrivateKeyMaterial, Report<AuthError>> {
    match get_pem_section(text, EC_PARAMETERS_LABEL) {
        Ok(parameters) => read_curve(&parameters, EC_PARAMETERS_LABEL)?,
        Err(report) if matches!(report.current_context(), AuthError::PemSectionNotFound { .. }) => {
            log::debug!("no {EC_PARAMETERS_LABEL} section, skipping curve check");
        }
        Err(report) => return Err(report.attach(format!("while reading {EC_PARAMETERS_LABEL}"))),
    }

    let der = match get_pem_section(text, EC_PRIVATE_KEY_LABEL) {
        Ok(der) => der,
        Err(report) if matches!(report.current_context(), AuthError::PemSectionNotFound { .. }) => {
            return Err(report.change_context(AuthError::key_format(
                "no private key found, did you supply a public key?",
            )));
        }
        Err(report) => return Err(report.attach(format!("while reading {EC_PRIVATE_KEY_LABEL}"))),
    };

    load_key_from_der(&der)
}

/// SHA-1 of the hex-decoded uncompressed public key, as lowercase hex.
///
/// # Errors
///
/// Returns [`AuthError::Format`] if `public_key_hex` is not valid hex.
pub fn key_identifier(public_key_hex: &str) -> Result<String, Report<AuthError>> {
    let bytes = hex_to_bytes(public_key_hex)?;
    Ok(key_identifier_from_bytes(&bytes))
}

fn key_identifier_from_bytes(public_key: &[u8]) -> String {
    bytes_to_hex(&Sha1::digest(public_key))
}

/// A secp256k1 signing key with its lazily computed key identifier.
///
/// Immutable once built; share it across threads and sign calls.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
    key_id: OnceCell<String>,
}

impl PrivateKey {
    /// # Errors
    ///
    /// Returns [`AuthError::KeyFormat`] if the scalar is zero or not below
    /// the curve order.
    pub fn from_material(material: &PrivateKeyMaterial) -> Result<Self, Report<AuthError>> {
        let signing_key = SigningKey::from_slice(material.as_bytes()).map_err(|_| {
            key_format_error("private key scalar is outside the range of the curve order")
        })?;
        Ok(Self::from_signing_key(signing_key))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            key_id: OnceCell::new(),
        }
    }

    /// Builds a key from a big-endian scalar of at most 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::KeyFormat`] for an oversized or out-of-range
    /// scalar.
    pub fn from_bytes(scalar: &[u8]) -> Result<Self, Report<AuthError>> {
        Self::from_material(&PrivateKeyMaterial::from_scalar_bytes(scalar)?)
    }

    /// # Errors
    ///
    /// Returns [`AuthError::Format`] for malformed hex, otherwise as
    /// [`PrivateKey::from_bytes`].
    pub fn from_hex(hex: &str) -> Result<Self, Report<AuthError>> {
        Self::from_bytes(&hex_to_bytes(hex)?)
    }

    /// # Errors
    ///
    /// See [`load_key_from_der`].
    pub fn from_der(der: &[u8]) -> Result<Self, Report<AuthError>> {
        Self::from_material(&load_key_from_der(der)?)
    }

    /// # Errors
    ///
    /// See [`load_key_from_pem`].
    pub fn from_pem(text: &str) -> Result<Self, Report<AuthError>> {
        let key = Self::from_material(&load_key_from_pem(text)?)?;
        log::debug!("loaded private key with id {}", key.key_identifier());
        Ok(key)
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut csprng = OsRng;
        Self::from_signing_key(SigningKey::random(&mut csprng))
    }

    #[must_use]
    pub fn material(&self) -> PrivateKeyMaterial {
        let mut bytes = [0u8; CURVE_BYTE_LENGTH];
        bytes.copy_from_slice(&self.signing_key.to_bytes());
        PrivateKeyMaterial(bytes)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Uncompressed public point without the `04` prefix: X then Y.
    #[must_use]
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let point = self.verifying_key().to_encoded_point(false);
        point.as_bytes()[1..].to_vec()
    }

    #[must_use]
    pub fn public_key_hex(&self) -> String {
        bytes_to_hex(&self.public_key_bytes())
    }

    /// Identifier sent alongside every signature. Computed on first use.
    #[must_use]
    pub fn key_identifier(&self) -> &str {
        self.key_id
            .get_or_init(|| key_identifier_from_bytes(&self.public_key_bytes()))
    }

    /// RFC 5915 encoding including the curve and the public key.
    #[must_use]
    pub fn to_der(&self) -> Vec<u8> {
        let mut public_point = Vec::with_capacity(1 + 2 * CURVE_BYTE_LENGTH);
        public_point.push(UNCOMPRESSED_POINT_PREFIX);
        public_point.extend_from_slice(&self.public_key_bytes());

        let version = encode_integer(EC_PRIVATE_KEY_VERSION);
        let scalar = encode_octet_string(self.material().as_bytes());
        let parameters = encode_constructed(PARAMETERS_TAG, &SECP256K1_OID_DER);
        let public_key = encode_constructed(PUBLIC_KEY_TAG, &encode_bit_string(&public_point, 0));

        encode_sequence(&[&version, &scalar, &parameters, &public_key])
    }

    /// `EC PARAMETERS` followed by `EC PRIVATE KEY`, as OpenSSL writes them.
    #[must_use]
    pub fn to_pem(&self) -> String {
        let mut out = encode_pem(EC_PARAMETERS_LABEL, &SECP256K1_OID_DER);
        out.push_str(&encode_pem(EC_PRIVATE_KEY_LABEL, &self.to_der()));
        out
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der_writer::encode_oid;
    use crate::test_support::tests::{
        key_file_pem, EC_PRIVATE_KEY_PEM, GENERATOR_HEX, GENERATOR_KEY_ID, KEY_DER_HEX, KEY_ID,
        P256_PARAMETERS_PEM, PUBLIC_KEY_HEX, SCALAR_HEX,
    };

    fn fixture_der() -> Vec<u8> {
        hex_to_bytes(KEY_DER_HEX).expect("fixture should be hex")
    }

    fn assert_key_format_error<T: fmt::Debug>(result: Result<T, Report<AuthError>>) {
        match result {
            Err(report) => assert!(
                matches!(report.current_context(), AuthError::KeyFormat { .. }),
                "expected key format error, got {report:?}"
            ),
            Ok(value) => panic!("expected key format error, got {value:?}"),
        }
    }

    fn secp256k1_oid() -> Vec<u8> {
        encode_oid(&ObjectIdentifier::secp256k1()).expect("should encode curve")
    }

    fn key_der(version: u64, scalar: &[u8], curve: &ObjectIdentifier) -> Vec<u8> {
        let curve = encode_oid(curve).expect("should encode curve");
        encode_sequence(&[
            &encode_integer(version),
            &encode_octet_string(scalar),
            &encode_constructed(0, &curve),
        ])
    }

    #[test]
    fn test_secp256k1_oid_der_matches_encoder() {
        assert_eq!(secp256k1_oid(), SECP256K1_OID_DER);
    }

    #[test]
    fn test_load_key_from_der_trailing_data_after_curve() {
        let mut curve = secp256k1_oid();
        curve.extend_from_slice(&[0x05, 0x00]);
        let der = encode_sequence(&[
            &encode_integer(1),
            &encode_octet_string(&[0x01; 32]),
            &encode_constructed(0, &curve),
        ]);
        let report = load_key_from_der(&der).expect_err("should reject trailing curve data");
        assert!(matches!(report.current_context(), AuthError::KeyFormat { .. }));
        assert!(report.current_context().to_string().contains("trailing junk"));
    }

    #[test]
    fn test_load_key_from_der() {
        let material = load_key_from_der(&fixture_der()).expect("should load fixture");
        assert_eq!(bytes_to_hex(material.as_bytes()), SCALAR_HEX);
    }

    #[test]
    fn test_load_key_from_der_pads_short_scalar() {
        let scalar = [0x01u8; 31];
        let der = key_der(1, &scalar, &ObjectIdentifier::secp256k1());
        let material = load_key_from_der(&der).expect("should load short scalar");
        assert_eq!(material.as_bytes()[0], 0x00);
        assert_eq!(material.as_bytes()[1..], scalar);
    }

    #[test]
    fn test_load_key_from_der_without_public_key() {
        let scalar = hex_to_bytes(SCALAR_HEX).expect("fixture should be hex");
        let der = key_der(1, &scalar, &ObjectIdentifier::secp256k1());
        let material = load_key_from_der(&der).expect("should load key");
        assert_eq!(material.as_bytes()[..], scalar[..]);
    }

    #[test]
    fn test_load_key_from_der_trailing_data() {
        let mut der = fixture_der();
        der.push(0x00);
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_wrong_version() {
        let der = key_der(0, &[0x01; 32], &ObjectIdentifier::secp256k1());
        assert_key_format_error(load_key_from_der(&der));
        let der = key_der(2, &[0x01; 32], &ObjectIdentifier::secp256k1());
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_rejects_wrapped_key() {
        let der = encode_sequence(&[
            &encode_integer(1),
            &encode_sequence(&[&secp256k1_oid()]),
            &encode_octet_string(&[0x01; 32]),
        ]);
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_wrong_curve() {
        let p256 = ObjectIdentifier::new(vec![1, 2, 840, 10045, 3, 1, 7]);
        let der = key_der(1, &[0x01; 32], &p256);
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_wrong_context_tag() {
        let der = encode_sequence(&[
            &encode_integer(1),
            &encode_octet_string(&[0x01; 32]),
            &encode_constructed(1, &secp256k1_oid()),
        ]);
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_missing_parameters() {
        let der = encode_sequence(&[&encode_integer(1), &encode_octet_string(&[0x01; 32])]);
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_oversized_scalar() {
        let der = key_der(1, &[0x01; 33], &ObjectIdentifier::secp256k1());
        assert_key_format_error(load_key_from_der(&der));
    }

    #[test]
    fn test_load_key_from_der_keeps_der_cause() {
        let report = load_key_from_der(&[0x30, 0x05, 0x02]).expect_err("should fail");
        assert!(matches!(report.current_context(), AuthError::KeyFormat { .. }));
        assert!(
            report
                .frames()
                .filter_map(|frame| frame.downcast_ref::<AuthError>())
                .any(|error| matches!(error, AuthError::Der { .. })),
            "report should carry the underlying DER error"
        );
    }

    #[test]
    fn test_load_key_from_pem() {
        let material = load_key_from_pem(&key_file_pem()).expect("should load key file");
        assert_eq!(bytes_to_hex(material.as_bytes()), SCALAR_HEX);
    }

    #[test]
    fn test_load_key_from_pem_without_parameters() {
        let material = load_key_from_pem(EC_PRIVATE_KEY_PEM).expect("parameters are optional");
        assert_eq!(bytes_to_hex(material.as_bytes()), SCALAR_HEX);
    }

    #[test]
    fn test_load_key_from_pem_wrong_curve_parameters() {
        let text = format!("{P256_PARAMETERS_PEM}{EC_PRIVATE_KEY_PEM}");
        assert_key_format_error(load_key_from_pem(&text));
    }

    #[test]
    fn test_load_key_from_pem_malformed_parameters_is_an_error() {
        let text = format!("-----BEGIN EC PARAMETERS-----\nAgEB\n-----END EC PARAMETERS-----\n{EC_PRIVATE_KEY_PEM}");
        assert_key_format_error(load_key_from_pem(&text));

        let text = format!("-----BEGIN EC PARAMETERS-----\nBgUrgQQACg==\n{EC_PRIVATE_KEY_PEM}");
        let report = load_key_from_pem(&text).expect_err("unterminated section should fail");
        assert!(matches!(report.current_context(), AuthError::Format { .. }));
    }

    #[test]
    fn test_load_key_from_pem_trailing_data_after_parameters() {
        let mut parameters = secp256k1_oid();
        parameters.extend_from_slice(&[0x05, 0x00, 0xde, 0xad]);
        let text = format!(
            "{}{EC_PRIVATE_KEY_PEM}",
            encode_pem(EC_PARAMETERS_LABEL, &parameters)
        );
        let report = load_key_from_pem(&text).expect_err("should reject trailing parameter data");
        assert!(matches!(report.current_context(), AuthError::KeyFormat { .. }));
        assert!(report.current_context().to_string().contains("trailing junk"));
    }

    #[test]
    fn test_load_key_from_pem_public_key_only() {
        let text = "-----BEGIN PUBLIC KEY-----
MFYwEAYHKoZIzj0CAQYFK4EEAAoDQgAEjJaJh5wfZwvj8b3bQ4GYikqDTLXWUjMh
kFs9lGj2N9B17zo37p4PSy99rDio0QHLadpso0rtTJDSISRW9MdOqA==
-----END PUBLIC KEY-----
";
        let report = load_key_from_pem(text).expect_err("should fail without private key");
        assert!(matches!(report.current_context(), AuthError::KeyFormat { .. }));
        assert!(report
            .current_context()
            .to_string()
            .contains("did you supply a public key?"));
    }

    #[test]
    fn test_private_key_constructors_agree() {
        let from_pem = PrivateKey::from_pem(&key_file_pem()).expect("should load pem");
        let from_der = PrivateKey::from_der(&fixture_der()).expect("should load der");
        let from_hex = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        let from_upper_hex =
            PrivateKey::from_hex(&SCALAR_HEX.to_uppercase()).expect("should load upper hex");

        for key in [&from_pem, &from_der, &from_hex, &from_upper_hex] {
            assert_eq!(bytes_to_hex(key.material().as_bytes()), SCALAR_HEX);
            assert_eq!(key.public_key_hex(), PUBLIC_KEY_HEX);
        }
    }

    #[test]
    fn test_private_key_from_short_bytes() {
        let key = PrivateKey::from_bytes(&[0x01]).expect("should load scalar one");
        assert_eq!(key.public_key_hex(), GENERATOR_HEX);
        assert_eq!(key.key_identifier(), GENERATOR_KEY_ID);
    }

    #[test]
    fn test_private_key_rejects_out_of_range_scalars() {
        assert_key_format_error(PrivateKey::from_bytes(&[0x00; 32]));
        assert_key_format_error(PrivateKey::from_bytes(&[0xff; 32]));
        assert_key_format_error(PrivateKey::from_bytes(&[0x01; 33]));
    }

    #[test]
    fn test_private_key_from_bad_hex() {
        let report = PrivateKey::from_hex("abc").expect_err("odd hex should fail");
        assert!(matches!(report.current_context(), AuthError::Format { .. }));
    }

    #[test]
    fn test_key_identifier() {
        assert_eq!(
            key_identifier(PUBLIC_KEY_HEX).expect("should hash public key"),
            KEY_ID
        );
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        assert_eq!(key.key_identifier(), KEY_ID);
        assert_eq!(key.key_identifier().len(), 40);
    }

    #[test]
    fn test_key_identifier_is_cached() {
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        let first: *const str = key.key_identifier();
        let second: *const str = key.key_identifier();
        assert_eq!(first, second, "second call should return the cached value");

        let other = PrivateKey::from_der(&fixture_der()).expect("should load der");
        assert_eq!(key.key_identifier(), other.key_identifier());
    }

    #[test]
    fn test_key_identifier_concurrent_first_access() {
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        let ids: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| key.key_identifier().to_string()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread should not panic"))
                .collect()
        });
        assert!(ids.iter().all(|id| id == KEY_ID));
    }

    #[test]
    fn test_key_identifier_bad_hex() {
        let report = key_identifier("xyz").expect_err("should reject hex");
        assert!(matches!(report.current_context(), AuthError::Format { .. }));
    }

    #[test]
    fn test_to_der_matches_openssl_encoding() {
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        assert_eq!(bytes_to_hex(&key.to_der()), KEY_DER_HEX);
    }

    #[test]
    fn test_to_pem_matches_openssl_output() {
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        assert_eq!(key.to_pem(), key_file_pem());
    }

    #[test]
    fn test_generated_key_round_trips_through_pem() {
        let key = PrivateKey::generate();
        let loaded = PrivateKey::from_pem(&key.to_pem()).expect("should load generated key");
        assert_eq!(loaded.material(), key.material());
        assert_eq!(loaded.key_identifier(), key.key_identifier());
    }

    #[test]
    fn test_debug_does_not_leak_scalar() {
        let key = PrivateKey::from_hex(SCALAR_HEX).expect("should load hex");
        let debug = format!("{key:?} {:?}", key.material());
        assert!(!debug.contains(SCALAR_HEX));
        assert!(debug.contains(PUBLIC_KEY_HEX));
    }
}
