//! 域名绑定请求与结果

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pages_orchestrator_provider::log_sanitizer::redact_token;
use pages_orchestrator_provider::{ApiEnvelope, ApiMessage};

use crate::error::{CoreError, CoreResult};

/// 一次添加/移除自定义域名的请求（不持久化）
#[derive(Clone)]
pub struct DomainBindingRequest {
    pub account_id: String,
    pub project_name: String,
    pub domain_name: String,
    pub pages_token: String,
    pub zone_token: Option<String>,
}

impl DomainBindingRequest {
    /// 在发起任何网络请求之前校验输入
    pub fn validate(&self) -> CoreResult<()> {
        if self.pages_token.trim().is_empty() {
            return Err(CoreError::MissingPagesToken);
        }
        if self.account_id.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "account id is required".to_string(),
            ));
        }
        if self.project_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "project name is required".to_string(),
            ));
        }
        if self.domain_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "domain name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Zone token，空字符串视为未提供
    pub fn zone_credential(&self) -> Option<&str> {
        self.zone_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for DomainBindingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainBindingRequest")
            .field("account_id", &self.account_id)
            .field("project_name", &self.project_name)
            .field("domain_name", &self.domain_name)
            .field("pages_token", &redact_token(&self.pages_token))
            .field("zone_token", &self.zone_token.as_deref().map(redact_token))
            .finish()
    }
}

/// Pages 主操作失败的原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PagesError {
    /// Provider 拒绝了请求，错误列表原样保留
    Provider { errors: Vec<ApiMessage> },
    /// 请求没有得到可解析的响应
    Transport { message: String },
}

/// DNS 步骤未执行的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    PagesFailed,
    NoZoneCredential,
    NoMatchingZone,
    ZoneLookupFailed { message: String },
}

/// DNS 步骤的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum DnsStatus {
    NotAttempted { reason: SkipReason },
    Created { record_id: String },
    Deleted { record_id: String },
    /// 移除时没有找到对应的 CNAME 记录
    AlreadyClean,
    Failed { message: String },
}

/// 绑定操作的组合结果
///
/// 只能通过构造函数创建，保证：
/// - `dns_attempted` 为 true 时 `pages_success` 一定为 true
/// - `dns_outcome` 仅在 `dns_attempted` 为 true 时为 `Some`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingResult {
    pages_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages_error: Option<PagesError>,
    dns_attempted: bool,
    dns_outcome: Option<bool>,
    dns_status: DnsStatus,
}

impl BindingResult {
    /// Pages 主操作失败，DNS 不执行
    pub fn pages_failed(error: PagesError) -> Self {
        Self {
            pages_success: false,
            pages_error: Some(error),
            dns_attempted: false,
            dns_outcome: None,
            dns_status: DnsStatus::NotAttempted {
                reason: SkipReason::PagesFailed,
            },
        }
    }

    /// Pages 成功，DNS 被跳过
    pub fn dns_skipped(reason: SkipReason) -> Self {
        Self {
            pages_success: true,
            pages_error: None,
            dns_attempted: false,
            dns_outcome: None,
            dns_status: DnsStatus::NotAttempted { reason },
        }
    }

    pub fn dns_created(record_id: impl Into<String>) -> Self {
        Self::dns_finished(DnsStatus::Created {
            record_id: record_id.into(),
        })
    }

    pub fn dns_deleted(record_id: impl Into<String>) -> Self {
        Self::dns_finished(DnsStatus::Deleted {
            record_id: record_id.into(),
        })
    }

    pub fn dns_already_clean() -> Self {
        Self::dns_finished(DnsStatus::AlreadyClean)
    }

    pub fn dns_failed(message: impl Into<String>) -> Self {
        Self::dns_finished(DnsStatus::Failed {
            message: message.into(),
        })
    }

    fn dns_finished(status: DnsStatus) -> Self {
        let ok = !matches!(status, DnsStatus::Failed { .. });
        Self {
            pages_success: true,
            pages_error: None,
            dns_attempted: true,
            dns_outcome: Some(ok),
            dns_status: status,
        }
    }

    pub fn pages_success(&self) -> bool {
        self.pages_success
    }

    pub fn pages_error(&self) -> Option<&PagesError> {
        self.pages_error.as_ref()
    }

    pub fn dns_attempted(&self) -> bool {
        self.dns_attempted
    }

    pub fn dns_outcome(&self) -> Option<bool> {
        self.dns_outcome
    }

    pub fn dns_status(&self) -> &DnsStatus {
        &self.dns_status
    }

    /// Pages 成功但 DNS 需要手动处理
    pub fn requires_dns_follow_up(&self) -> bool {
        self.pages_success && self.dns_outcome != Some(true)
    }
}

/// 绑定操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingOperation {
    Add,
    Remove,
}

/// 绑定服务的返回值：Provider 的 envelope 加上组合结果
#[derive(Debug, Clone)]
pub struct BindingOutcome {
    pub operation: BindingOperation,
    pub envelope: ApiEnvelope,
    pub result: BindingResult,
}

impl BindingOutcome {
    /// 返回给前端的响应体
    ///
    /// 在 envelope 上附加 `binding`，以及 `dns_created`（添加且执行了 DNS 步骤）
    /// 或 `dns_deleted`（移除且删除了记录）。
    pub fn into_envelope(self) -> ApiEnvelope {
        let mut envelope = self.envelope;
        match (self.operation, &self.result.dns_status) {
            (BindingOperation::Add, _) => {
                if let Some(ok) = self.result.dns_outcome {
                    envelope.insert("dns_created", Value::Bool(ok));
                }
            }
            (BindingOperation::Remove, DnsStatus::Deleted { .. }) => {
                envelope.insert("dns_deleted", Value::Bool(true));
            }
            (BindingOperation::Remove, _) => {}
        }
        let binding = serde_json::to_value(&self.result).unwrap_or(Value::Null);
        envelope.insert("binding", binding);
        envelope
    }
}
