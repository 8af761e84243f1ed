//! Authentication module for Kraken API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - Form and JSON request bodies that carry the nonce and optional OTP
//! - HMAC-SHA512 signature generation for authenticated requests

mod body;
mod credentials;
mod nonce;
mod otp;
mod signature;

pub use body::{
    FORM_CONTENT_TYPE, FormBody, JSON_CONTENT_TYPE, JsonBody, NONCE_KEY, OTP_KEY, RequestBody,
};
pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{ClockNonce, IncreasingNonce, NonceProvider};
pub use otp::Otp;
pub use signature::Signer;
