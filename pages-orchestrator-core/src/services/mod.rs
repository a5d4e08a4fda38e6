//! 业务逻辑服务层

mod binding_service;
mod cf_route;
mod config_service;
mod name_generator;
mod zone_resolver;

pub use binding_service::BindingService;
pub use cf_route::CfRoute;
pub use config_service::ConfigService;
pub use name_generator::{
    NameGeneratorService, SUBDOMAIN_LABEL, decode_date, generate_names, generate_with_rng,
};
pub use zone_resolver::{
    MAX_ZONE_PAGES, ZONE_PAGE_SIZE, ZoneResolution, ZoneResolver, find_parent_zone,
};

use std::sync::Arc;

use crate::traits::{ConfigRepository, ProviderFactory};

/// Pages 默认域名后缀
pub const DEFAULT_PAGES_SUFFIX: &str = "pages.dev";

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// 用户配置仓库
    pub config_repository: Arc<dyn ConfigRepository>,
    /// 按 token 构造 Provider
    pub provider_factory: Arc<dyn ProviderFactory>,
    /// Pages 项目默认域名后缀，CNAME 指向 `<project>.<suffix>`
    pub pages_suffix: String,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        config_repository: Arc<dyn ConfigRepository>,
        provider_factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            config_repository,
            provider_factory,
            pages_suffix: DEFAULT_PAGES_SUFFIX.to_string(),
        }
    }

    /// 覆盖 Pages 域名后缀
    #[must_use]
    pub fn with_pages_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.pages_suffix = suffix.into();
        self
    }

    /// 项目的 Pages 默认域名（CNAME 目标）
    pub fn pages_target(&self, project_name: &str) -> String {
        format!("{project_name}.{}", self.pages_suffix)
    }
}
