//! Pages Orchestrator Core Library
//!
//! Business logic for the Pages custom-domain control panel:
//! - Zone resolution (longest-suffix match over the zones a token can see)
//! - Domain binding orchestration (Pages binding first, DNS record second)
//! - Date-keyed subdomain name generation
//! - User config persistence
//!
//! Storage and provider access are abstracted through traits, so the same
//! services run behind the Actix-web backend and against mocks in tests.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{
    CloudflareProviderFactory, ConfigRepository, InMemoryConfigRepository, ProviderFactory,
};
