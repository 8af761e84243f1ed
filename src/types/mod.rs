//! Common types used across the Kraken client library.

pub mod common;

pub use common::*;
