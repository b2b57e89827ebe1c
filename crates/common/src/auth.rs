//! Attaching authentication headers to outbound requests.
//!
//! [`RequestSigner::attach_auth`] never edits the request it is given; it
//! returns a copy carrying the key identifier and signature headers.

use error_stack::{Report, ResultExt};
use http::{HeaderMap, HeaderName, HeaderValue, Request};

use crate::error::AuthError;
use crate::key::PrivateKey;
use crate::settings::Signing;
use crate::signer::sign;

/// Names of the headers carrying the key identifier and the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub key_id: HeaderName,
    pub signature: HeaderName,
}

impl Default for AuthHeaders {
    fn default() -> Self {
        Self {
            key_id: HeaderName::from_static("x-key-id"),
            signature: HeaderName::from_static("x-signature"),
        }
    }
}

impl AuthHeaders {
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if a configured name is not a
    /// valid header name.
    pub fn from_settings(signing: &Signing) -> Result<Self, Report<AuthError>> {
        let parse = |name: &str| {
            HeaderName::from_bytes(name.as_bytes()).change_context(AuthError::Configuration {
                message: format!("invalid header name '{name}'"),
            })
        };
        Ok(Self {
            key_id: parse(&signing.key_id_header)?,
            signature: parse(&signing.signature_header)?,
        })
    }
}

/// Signs outbound messages with one key and stamps the result on requests.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    key: PrivateKey,
    headers: AuthHeaders,
}

impl RequestSigner {
    /// Uses the default `X-Key-Id` and `X-Signature` header names.
    #[must_use]
    pub fn new(key: PrivateKey) -> Self {
        let signer = Self::with_headers(key, AuthHeaders::default());
        log::debug!(
            "request signer uses {} and {} headers",
            signer.headers.key_id,
            signer.headers.signature
        );
        signer
    }

    #[must_use]
    pub fn with_headers(key: PrivateKey, headers: AuthHeaders) -> Self {
        Self { key, headers }
    }

    /// Loads the key from `pem_text` and the header names from `signing`.
    ///
    /// # Errors
    ///
    /// Returns the key loading error or [`AuthError::Configuration`] for
    /// invalid header names.
    pub fn from_pem(pem_text: &str, signing: &Signing) -> Result<Self, Report<AuthError>> {
        let key = PrivateKey::from_pem(pem_text)?;
        let headers = AuthHeaders::from_settings(signing)?;
        log::info!("Loaded request signing key with id {}", key.key_identifier());
        Ok(Self::with_headers(key, headers))
    }

    #[must_use]
    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        self.key.key_identifier()
    }

    #[must_use]
    pub fn headers(&self) -> &AuthHeaders {
        &self.headers
    }

    /// # Errors
    ///
    /// See [`crate::signer::sign`].
    pub fn sign(&self, message: &str) -> Result<String, Report<AuthError>> {
        sign(&self.key, message)
    }

    /// The two authentication headers for `message`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if signing fails.
    pub fn auth_headers(&self, message: &str) -> Result<HeaderMap, Report<AuthError>> {
        let signature = self.sign(message)?;

        let to_value = |value: &str| {
            HeaderValue::from_str(value).change_context(AuthError::Signing {
                message: "value is not a valid header value".to_string(),
            })
        };

        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(self.headers.key_id.clone(), to_value(self.key_id())?);
        headers.insert(self.headers.signature.clone(), to_value(&signature)?);
        Ok(headers)
    }

    /// Returns a copy of `request` with the authentication headers for
    /// `message` set, replacing any existing values.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if signing fails.
    pub fn attach_auth<B: Clone>(
        &self,
        request: &Request<B>,
        message: &str,
    ) -> Result<Request<B>, Report<AuthError>> {
        let auth = self.auth_headers(message)?;

        let mut signed = Request::new(request.body().clone());
        *signed.method_mut() = request.method().clone();
        *signed.uri_mut() = request.uri().clone();
        *signed.version_mut() = request.version();
        *signed.extensions_mut() = request.extensions().clone();

        let headers = signed.headers_mut();
        *headers = request.headers().clone();
        for (name, value) in &auth {
            headers.insert(name.clone(), value.clone());
        }

        log::debug!(
            "Attached auth headers to {} {} with key id {}",
            request.method(),
            request.uri(),
            self.key_id()
        );

        Ok(signed)
    }
}
