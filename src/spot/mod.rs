//! Kraken Spot trading API clients.
//!
//! This module provides:
//! - [`rest`] - REST API client for HTTP-based requests

pub mod rest;

pub use rest::SpotRestClient;
