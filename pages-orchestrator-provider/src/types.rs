use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Cloudflare's sentinel TTL meaning "automatic".
pub const TTL_AUTOMATIC: u32 = 1;

// ============ Pagination Types ============

/// Pagination parameters for list operations.
///
/// # Default
///
/// `page = 1, page_size = 50` (the Cloudflare zones maximum).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl PaginationParams {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// A single page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let has_more = page.saturating_mul(page_size) < total_count;
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }
}

// ============ Envelope Types ============

/// One entry of the provider's `errors` (or `messages`) list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Provider error code. Absent on errors synthesized locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Anything else the provider sent (e.g. `documentation_url`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiMessage {
    /// Create a message without a provider code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            extra: Map::new(),
        }
    }
}

/// The provider's JSON response envelope, preserved field-for-field.
///
/// Unknown top-level fields (`result_info`, ...) land in [`extra`](Self::extra) and
/// are written back on serialization, so relaying an envelope does not lose data.
/// Fields the provider omitted stay `None` and are omitted again on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the provider accepted the request.
    pub success: bool,
    /// Structured errors; empty on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiMessage>>,
    /// Informational messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Value>>,
    /// Operation payload. An explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
    /// Remaining top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    /// Build a failed envelope carrying a single locally-produced error.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: Some(vec![ApiMessage::new(message)]),
            messages: Some(Vec::new()),
            result: Some(Value::Null),
            extra: Map::new(),
        }
    }

    /// Attach an extra top-level field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.extra.insert(key.into(), value);
    }

    /// Structured errors, empty when the provider sent none.
    pub fn errors(&self) -> &[ApiMessage] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// First error message, if any.
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors().first().map(|e| e.message.as_str())
    }
}

/// 字段出现即为 `Some`，包括显式的 `null`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============ Zone / DNS Types ============

/// A DNS zone visible to the zone token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier.
    pub id: String,
    /// Registrable zone name, e.g. `example.com`.
    pub name: String,
}

/// A DNS record as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record identifier.
    pub id: String,
    /// Record type (`CNAME`, `A`, ...).
    pub record_type: String,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content (target for CNAME).
    pub content: String,
    /// TTL in seconds, `1` meaning automatic.
    pub ttl: u32,
    /// Whether traffic is proxied through the provider.
    pub proxied: Option<bool>,
}

/// Body of a DNS record creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordRequest {
    /// Record type (`CNAME`, ...).
    pub record_type: String,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content.
    pub content: String,
    /// TTL in seconds, [`TTL_AUTOMATIC`] for automatic.
    pub ttl: u32,
    /// Whether traffic is proxied through the provider.
    pub proxied: bool,
}

impl CreateDnsRecordRequest {
    /// A proxied CNAME with automatic TTL.
    pub fn proxied_cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            record_type: "CNAME".to_string(),
            name: name.into(),
            content: target.into(),
            ttl: TTL_AUTOMATIC,
            proxied: true,
        }
    }
}

/// Exact-match record lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    /// Fully-qualified record name.
    pub name: String,
    /// Record type.
    pub record_type: String,
}

impl RecordQuery {
    /// Query for the CNAME record named `name`.
    pub fn cname(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: "CNAME".to_string(),
        }
    }
}

// ============ Pass-through Types ============

/// A request to forward unmodified to the provider API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRequest {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Path relative to the API base, without a leading slash.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    /// Raw body. Ignored for `GET`.
    pub body: Option<String>,
}

/// The provider's raw response to a forwarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unmodified.
    pub body: String,
}
