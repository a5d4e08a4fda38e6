use serde::{Deserialize, Serialize};

/// 生成结果中的一行：`label` 供展示，`value` 为子域名或完整 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedName {
    pub label: String,
    pub value: String,
}

impl GeneratedName {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
