//! User config repository abstract Trait

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::UserConfig;

/// User config repository Trait
///
/// Holds a single `UserConfig`, replaced wholesale on save.
/// Provides a default memory implementation of `InMemoryConfigRepository`.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Load the stored config, `None` if nothing has been saved yet
    async fn load(&self) -> CoreResult<Option<UserConfig>>;

    /// Replace the stored config
    ///
    /// # Arguments
    /// * `config` - New config
    async fn save(&self, config: &UserConfig) -> CoreResult<()>;
}

/// In-memory config repository
///
/// Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryConfigRepository {
    config: Arc<RwLock<Option<UserConfig>>>,
}

impl InMemoryConfigRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn load(&self) -> CoreResult<Option<UserConfig>> {
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &UserConfig) -> CoreResult<()> {
        *self.config.write().await = Some(config.clone());
        Ok(())
    }
}
