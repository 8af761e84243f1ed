//! One-time passwords for accounts with two-factor API keys.

use secrecy::{ExposeSecret, SecretString};

/// A one-time password sent as the `otp` field of a private request.
///
/// Supplied per call through [`RequestContext`](crate::spot::rest::RequestContext)
/// and never stored on the client.
#[derive(Clone)]
pub struct Otp(SecretString);

impl Otp {
    /// Wrap a one-time password.
    pub fn new(otp: impl Into<String>) -> Self {
        Self(SecretString::from(otp.into()))
    }

    /// Get the password value.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the password is empty. An empty OTP is never sent.
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl From<&str> for Otp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Otp {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Otp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Otp([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_debug_redacted() {
        let otp = Otp::from("123456");
        assert_eq!(otp.expose(), "123456");
        assert!(!format!("{:?}", otp).contains("123456"));
    }

    #[test]
    fn test_empty_otp() {
        assert!(Otp::from("").is_empty());
        assert!(!Otp::from("1").is_empty());
    }
}
