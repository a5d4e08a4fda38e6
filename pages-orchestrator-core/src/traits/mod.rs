//! Storage and provider abstraction trait definition

mod config_repository;
mod provider_factory;

pub use config_repository::{ConfigRepository, InMemoryConfigRepository};
pub use provider_factory::{CloudflareProviderFactory, ProviderFactory};
