//! Per-call options for private requests.

use std::time::Duration;

use crate::auth::Otp;

/// Options scoped to a single private request.
///
/// Every private endpoint takes a context. Use [`RequestContext::default()`]
/// when nothing needs to be set.
///
/// ```rust
/// use std::time::Duration;
/// use kraken_rest_client::spot::rest::RequestContext;
///
/// let ctx = RequestContext::new()
///     .with_otp("123456")
///     .with_timeout(Duration::from_secs(5));
/// assert!(ctx.otp().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    otp: Option<Otp>,
    timeout: Option<Duration>,
}

impl RequestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a one-time password for this call.
    pub fn with_otp(mut self, otp: impl Into<Otp>) -> Self {
        self.otp = Some(otp.into());
        self
    }

    /// Limit how long this call may take, overriding the client timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The one-time password, if one was attached and it is not empty.
    pub fn otp(&self) -> Option<&Otp> {
        self.otp.as_ref().filter(|otp| !otp.is_empty())
    }

    /// The per-call timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
