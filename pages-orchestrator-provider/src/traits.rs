use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    ApiEnvelope, CreateDnsRecordRequest, DnsRecord, ForwardRequest, ForwardResponse,
    PaginatedResponse, PaginationParams, RecordQuery, Zone,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 为数字，这里统一为字符串）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists`）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound`）
    pub record_id: Option<String>,
    /// Zone 名称或 ID（用于 `ZoneNotFound`）
    pub zone: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Pages custom-domain operations, authenticated with a Pages token.
///
/// Rejections by the provider come back as `Ok` envelopes with `success == false`;
/// `Err` means the request never produced an envelope (transport or parse failure).
#[async_trait]
pub trait PagesApi: Send + Sync {
    /// Bind `domain_name` to `project_name`.
    async fn add_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> Result<ApiEnvelope>;

    /// Unbind `domain_name` from `project_name`.
    async fn remove_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> Result<ApiEnvelope>;

    /// Forward an arbitrary request to the provider API and return its raw response.
    async fn forward(&self, request: &ForwardRequest) -> Result<ForwardResponse>;
}

/// Zone and DNS record operations, authenticated with a zone token.
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// 获取 Zone 列表 (分页)
    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<Zone>>;

    /// 按名称与类型精确查询 DNS 记录
    async fn list_records(&self, zone_id: &str, query: &RecordQuery) -> Result<Vec<DnsRecord>>;

    /// 创建 DNS 记录
    async fn create_record(&self, zone_id: &str, req: &CreateDnsRecordRequest)
    -> Result<DnsRecord>;

    /// 删除 DNS 记录
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
