//! 基于 JSON 文件的用户配置存储
//!
//! 文件内容为 `{ "user_config": { ... } }`。写入时先写临时文件再 rename，
//! 进程中途退出不会留下半个文件。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pages_orchestrator_core::types::UserConfig;
use pages_orchestrator_core::{ConfigRepository, CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Serialize, Deserialize)]
struct StoredConfig {
    user_config: Option<UserConfig>,
}

pub struct JsonFileConfigRepository {
    path: PathBuf,
    /// 串行化写入
    write_lock: Mutex<()>,
}

impl JsonFileConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(action: &str, path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::StorageError(format!("{action} {}: {e}", path.display()))
}

#[async_trait]
impl ConfigRepository for JsonFileConfigRepository {
    async fn load(&self) -> CoreResult<Option<UserConfig>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("Failed to read", &self.path, &e)),
        };

        let stored: StoredConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::SerializationError(format!("{}: {e}", self.path.display()))
        })?;
        Ok(stored.user_config)
    }

    async fn save(&self, config: &UserConfig) -> CoreResult<()> {
        let stored = StoredConfig {
            user_config: Some(config.clone()),
        };
        let json = serde_json::to_vec_pretty(&stored)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("Failed to create", parent, &e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| storage_error("Failed to write", &temp, &e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| storage_error("Failed to replace", &self.path, &e))?;

        tracing::debug!("用户配置已写入 {}", self.path.display());
        Ok(())
    }
}
