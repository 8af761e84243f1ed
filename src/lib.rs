//! # Kraken REST Client
//!
//! An async Rust client library for the Kraken exchange REST API.
//!
//! ## Features
//!
//! - Nonce-based HMAC-SHA512 request signing over form and JSON bodies
//! - Optional per-call one-time passwords and timeouts via [`RequestContext`]
//! - Local validation of required fields before anything is sent
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_rest_client::spot::rest::SpotRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotRestClient::new();
//!     let time = client.get_server_time().await?;
//!     println!("Server time: {:?}", time);
//!     Ok(())
//! }
//! ```
//!
//! [`RequestContext`]: spot::rest::RequestContext

pub mod auth;
pub mod error;
pub mod spot;
pub mod types;

// Re-export commonly used types at crate root
pub use error::KrakenError;
pub use types::common::{BuySell, OrderType};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
