//! `/api/cf/{path}` 路由分类

/// 代理请求的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CfRoute {
    /// `POST accounts/{aid}/pages/projects/{project}/domains`，域名在请求体的 `name` 中
    AddDomain {
        account_id: String,
        project_name: String,
    },
    /// `DELETE accounts/{aid}/pages/projects/{project}/domains/{domain}`
    RemoveDomain {
        account_id: String,
        project_name: String,
        domain_name: String,
    },
    /// 其他请求原样转发
    PassThrough,
}

impl CfRoute {
    /// 按 HTTP 方法与相对路径（去掉 `/api/cf/` 前缀）分类
    pub fn classify(method: &str, path: &str) -> Self {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Self::PassThrough;
        }

        match (method.to_ascii_uppercase().as_str(), segments.as_slice()) {
            ("POST", ["accounts", account_id, "pages", "projects", project_name, "domains"]) => {
                Self::AddDomain {
                    account_id: (*account_id).to_string(),
                    project_name: (*project_name).to_string(),
                }
            }
            (
                "DELETE",
                [
                    "accounts",
                    account_id,
                    "pages",
                    "projects",
                    project_name,
                    "domains",
                    domain_name,
                ],
            ) => Self::RemoveDomain {
                account_id: (*account_id).to_string(),
                project_name: (*project_name).to_string(),
                domain_name: (*domain_name).to_string(),
            },
            _ => Self::PassThrough,
        }
    }

    /// 用 `X-Account-Id` 覆盖路径中的账户 ID（空值忽略）
    #[must_use]
    pub fn with_account_override(self, account_id: Option<&str>) -> Self {
        let Some(override_id) = account_id.map(str::trim).filter(|s| !s.is_empty()) else {
            return self;
        };
        match self {
            Self::AddDomain { project_name, .. } => Self::AddDomain {
                account_id: override_id.to_string(),
                project_name,
            },
            Self::RemoveDomain {
                project_name,
                domain_name,
                ..
            } => Self::RemoveDomain {
                account_id: override_id.to_string(),
                project_name,
                domain_name,
            },
            Self::PassThrough => Self::PassThrough,
        }
    }
}
