//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The nonce also appears inside the POST data; Kraken wants it twice.
//! The signature is then base64-encoded and sent in the `API-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretSlice};
use sha2::{Digest, Sha256, Sha512};

use crate::auth::RequestBody;
use crate::error::KrakenError;

type HmacSha512 = Hmac<Sha512>;

/// Signs authenticated requests with a decoded API secret.
///
/// # Example
///
/// ```rust
/// use kraken_rest_client::auth::{FormBody, Signer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = Signer::new("YXBpX3NlY3JldA==")?; // base64 of "api_secret"
/// let body = FormBody::new(1616492376594);
/// let signature = signer.sign(&body, "/0/private/Balance")?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub struct Signer {
    secret: SecretSlice<u8>,
}

impl Signer {
    /// Create a signer from a base64-encoded API secret.
    ///
    /// Fails with [`KrakenError::Auth`] if the secret is not valid base64.
    pub fn new(secret: &str) -> Result<Self, KrakenError> {
        let decoded = BASE64
            .decode(secret)
            .map_err(|_| KrakenError::Auth("API secret must be valid base64.".to_string()))?;

        Ok(Self {
            secret: SecretSlice::from(decoded),
        })
    }

    /// Sign a request body for the given URL path (e.g. `/0/private/AddOrder`).
    ///
    /// Returns the base64-encoded HMAC-SHA512 signature.
    pub fn sign<B>(&self, body: &B, url_path: &str) -> Result<String, KrakenError>
    where
        B: RequestBody + ?Sized,
    {
        // Compute SHA256(nonce + POST_data).
        let mut sha256_hasher = Sha256::new();
        sha256_hasher.update(body.nonce().as_bytes());
        sha256_hasher.update(body.render().as_bytes());
        let sha256_hash = sha256_hasher.finalize();

        // Compute HMAC-SHA512(path + sha256_hash, decoded_secret).
        let mut hmac = HmacSha512::new_from_slice(self.secret.expose_secret())
            .map_err(|e| KrakenError::Auth(format!("Invalid HMAC key: {e}")))?;
        hmac.update(url_path.as_bytes());
        hmac.update(&sha256_hash);
        let hmac_result = hmac.finalize().into_bytes();

        Ok(BASE64.encode(hmac_result))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
