//! # pages-orchestrator-provider
//!
//! A thin client for the slice of the Cloudflare v4 REST API needed to manage
//! Pages custom domains:
//!
//! | Surface | Trait | Auth |
//! |---------|-------|------|
//! | Pages custom domains + verbatim pass-through | [`PagesApi`] | Pages API token |
//! | Zones and DNS records | [`ZoneApi`] | Zone API token |
//!
//! Both traits are implemented by [`CloudflareProvider`]; one instance is built
//! per token, so a caller holding two tokens holds two providers.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pages_orchestrator_provider::{CloudflareProvider, PaginationParams, ZoneApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = CloudflareProvider::new("zone-token".to_string())?;
//!
//!     let zones = provider.list_zones(&PaginationParams::default()).await?;
//!     for zone in &zones.items {
//!         println!("{} ({})", zone.name, zone.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Zone and DNS operations return [`Result<T, ProviderError>`](ProviderError),
//! with Cloudflare error codes mapped onto structured variants.
//!
//! Pages operations are different: a rejected request is **not** an error.
//! The provider's [`ApiEnvelope`] is returned as-is (with `success == false`)
//! so callers can relay the provider's own message verbatim. Only transport
//! and parse failures surface as [`ProviderError`].
//!
//! Nothing in this crate retries.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core traits only (internal traits are not exported)
pub use traits::{PagesApi, ZoneApi};

// Re-export types
pub use types::{
    ApiEnvelope, ApiMessage, CreateDnsRecordRequest, DnsRecord, ForwardRequest, ForwardResponse,
    PaginatedResponse, PaginationParams, RecordQuery, TTL_AUTOMATIC, Zone,
};

// Re-export utils
pub use utils::log_sanitizer;

// Re-export the concrete provider
pub use providers::{CF_API_BASE, CloudflareProvider, create_http_client};
