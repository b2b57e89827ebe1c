//! Request authentication with secp256k1 keys.
//!
//! This crate loads an EC private key from OpenSSL-style PEM, signs outbound
//! request messages with ECDSA-SHA256 and stamps the key identifier and
//! signature onto requests. Transport and response handling live elsewhere.
//!
//! # Modules
//!
//! - [`auth`]: Pure attachment of authentication headers to `http` requests
//! - [`codec`]: Big-endian integer and hex conversions
//! - [`der`]: Minimal DER reader for RFC 5915 EC private keys
//! - [`der_writer`]: Matching DER encoders for key export
//! - [`error`]: Error types and error handling utilities
//! - [`key`]: Key loading, key identifiers and key export
//! - [`oid`]: Object identifiers
//! - [`pem`]: PEM section extraction and encoding
//! - [`settings`]: Configuration management and validation
//! - [`signer`]: Compact ECDSA signatures, base64 encoded
//! - [`test_support`]: Shared test fixtures

pub mod auth;
pub mod codec;
pub mod der;
pub mod der_writer;
pub mod error;
pub mod key;
pub mod oid;
pub mod pem;
pub mod settings;
pub mod signer;
