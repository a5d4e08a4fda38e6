//! 应用状态

use std::sync::Arc;

use pages_orchestrator_core::ServiceContext;
use pages_orchestrator_core::services::{BindingService, ConfigService, NameGeneratorService};

/// 所有 worker 共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub binding: Arc<BindingService>,
    pub config: Arc<ConfigService>,
    pub generator: Arc<NameGeneratorService>,
    password: Arc<str>,
}

impl AppState {
    pub fn new(ctx: Arc<ServiceContext>, password: &str) -> Self {
        Self {
            binding: Arc::new(BindingService::new(ctx.clone())),
            config: Arc::new(ConfigService::new(ctx.clone())),
            generator: Arc::new(NameGeneratorService::new(ctx)),
            password: Arc::from(password),
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        *self.password == *candidate
    }
}
