//! 用户配置服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::UserConfig;

/// 用户配置服务
pub struct ConfigService {
    ctx: Arc<ServiceContext>,
}

impl ConfigService {
    /// 创建配置服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 已保存的配置，从未保存过时为 `None`
    pub async fn get(&self) -> CoreResult<Option<UserConfig>> {
        self.ctx.config_repository.load().await
    }

    /// 已保存的配置，从未保存过时返回默认配置
    pub async fn get_or_default(&self) -> CoreResult<UserConfig> {
        Ok(self.get().await?.unwrap_or_default())
    }

    /// 整体替换配置
    pub async fn save(&self, config: &UserConfig) -> CoreResult<()> {
        self.ctx.config_repository.save(config).await?;
        log::info!("User config saved ({} path slots)", config.paths.len());
        Ok(())
    }
}
