//! Cloudflare Pages / DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::redact_token;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

/// Cloudflare v4 API base URL.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare provider bound to a single API token.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_base: String,
    pub(crate) api_token: String,
}

impl CloudflareProvider {
    /// Create a provider with its own HTTP client, talking to the public API.
    pub fn new(api_token: String) -> Result<Self> {
        Ok(Self::with_client(create_http_client()?, CF_API_BASE, api_token))
    }

    /// Create a provider sharing an existing client, against `api_base`
    /// (no trailing slash). Used by servers and by tests pointing at a mock API.
    pub fn with_client(client: Client, api_base: impl Into<String>, api_token: String) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        log::debug!(
            "[cloudflare] provider for {api_base} using token {}",
            redact_token(&api_token)
        );
        Self {
            client,
            api_base,
            api_token,
        }
    }
}
