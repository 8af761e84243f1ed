//! Kraken Spot REST API client.
//!
//! Public endpoints are unauthenticated GET requests. Private endpoints are
//! signed POST requests: form encoded for most of them, JSON for Earn.
//!
//! # Trait-based API
//!
//! The [`KrakenClient`] trait abstracts all REST API operations, enabling:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., audit logging wrapper)
//! - Alternative implementations
//!
//! ```rust,no_run
//! use kraken_rest_client::spot::rest::{KrakenClient, SpotRestClient};
//!
//! async fn use_client<C: KrakenClient>(client: &C) -> Result<(), kraken_rest_client::error::KrakenError> {
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {}", time.unixtime);
//!     Ok(())
//! }
//! ```

mod client;
mod context;
mod endpoints;
pub mod private;
pub mod public;
mod traits;

pub use client::{SpotRestClient, SpotRestClientBuilder};
pub use context::RequestContext;
pub use endpoints::*;
pub use traits::KrakenClient;

use crate::error::KrakenError;

/// Rejects a required field that is empty or only whitespace.
pub(crate) fn require(value: &str, field: &str) -> Result<(), KrakenError> {
    if value.trim().is_empty() {
        return Err(KrakenError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank_values() {
        assert!(require("XBTUSD", "pair").is_ok());
        assert!(matches!(
            require("", "pair"),
            Err(KrakenError::InvalidRequest(msg)) if msg == "pair is required"
        ));
        assert!(require("  ", "email").is_err());
        assert!(require("\t\n", "pair").is_err());
    }
}
