//! 用户配置

use serde::{Deserialize, Serialize};

/// 默认父域名
pub const DEFAULT_PARENT_DOMAIN: &str = "example.com";

/// 路径槽位：生成 URL 时追加在子域名后的路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSlot {
    /// 显示名称，路径为空时也作为路径使用
    pub label: String,
    /// 路径
    #[serde(default)]
    pub value: String,
}

impl PathSlot {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// URL 中实际使用的路径
    pub fn path(&self) -> &str {
        if self.value.trim().is_empty() {
            &self.label
        } else {
            &self.value
        }
    }
}

/// 控制面板的用户配置，整体读取、整体替换
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserConfig {
    pub account_id: String,
    pub pages_token: String,
    pub zone_token: String,
    pub background_url: String,
    pub parent_domain: String,
    pub paths: Vec<PathSlot>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            pages_token: String::new(),
            zone_token: String::new(),
            background_url: String::new(),
            parent_domain: DEFAULT_PARENT_DOMAIN.to_string(),
            paths: vec![PathSlot::new("U1", "uuid")],
        }
    }
}

impl std::fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use pages_orchestrator_provider::log_sanitizer::redact_token;

        f.debug_struct("UserConfig")
            .field("account_id", &self.account_id)
            .field("pages_token", &redact_token(&self.pages_token))
            .field("zone_token", &redact_token(&self.zone_token))
            .field("background_url", &self.background_url)
            .field("parent_domain", &self.parent_domain)
            .field("paths", &self.paths)
            .finish()
    }
}
