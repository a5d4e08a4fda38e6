//! Provider factory abstract Trait

use std::sync::Arc;

use pages_orchestrator_provider::{CF_API_BASE, CloudflareProvider, PagesApi, ZoneApi};
use reqwest::Client;

/// Provider Factory Trait
///
/// Tokens arrive with every request, so providers are built per request
/// instead of being registered up front.
pub trait ProviderFactory: Send + Sync {
    /// Build a Pages client for `pages_token`
    fn pages_api(&self, pages_token: &str) -> Arc<dyn PagesApi>;

    /// Build a zone / DNS client for `zone_token`
    fn zone_api(&self, zone_token: &str) -> Arc<dyn ZoneApi>;
}

/// Cloudflare-backed factory
///
/// All providers share one HTTP client (and its connection pool).
#[derive(Clone)]
pub struct CloudflareProviderFactory {
    client: Client,
    api_base: String,
}

impl CloudflareProviderFactory {
    /// Create a factory against the public Cloudflare API
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_api_base(client, CF_API_BASE)
    }

    /// Create a factory against a custom API base (mock servers, proxies)
    #[must_use]
    pub fn with_api_base(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn build(&self, token: &str) -> CloudflareProvider {
        CloudflareProvider::with_client(self.client.clone(), self.api_base.clone(), token.to_string())
    }
}

impl ProviderFactory for CloudflareProviderFactory {
    fn pages_api(&self, pages_token: &str) -> Arc<dyn PagesApi> {
        Arc::new(self.build(pages_token))
    }

    fn zone_api(&self, zone_token: &str) -> Arc<dyn ZoneApi> {
        Arc::new(self.build(zone_token))
    }
}
