//! Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod cloudflare;

pub use cloudflare::{CF_API_BASE, CloudflareProvider};
pub use common::create_http_client;
