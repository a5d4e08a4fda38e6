//! 服务端配置
//!
//! 从 TOML 文件加载，路径取自 `PAGES_ORCHESTRATOR_CONFIG`（默认 `config.toml`）。
//! 文件不存在时全部使用默认值。

use std::path::{Path, PathBuf};

use anyhow::Context;
use pages_orchestrator_core::services::DEFAULT_PAGES_SUFFIX;
use pages_orchestrator_provider::CF_API_BASE;
use serde::Deserialize;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "PAGES_ORCHESTRATOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// 覆盖登录密码的环境变量
pub const PASSWORD_ENV: &str = "PASSWORD";
const DEFAULT_PASSWORD: &str = "admin";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub cloudflare: CloudflareConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 0 表示使用 CPU 核数
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 0,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 用户配置 JSON 文件
    pub config_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("data/user_config.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudflareConfig {
    pub api_base: String,
    /// CNAME 目标为 `<project>.<pages_suffix>`
    pub pages_suffix: String,
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            api_base: CF_API_BASE.to_string(),
            pages_suffix: DEFAULT_PAGES_SUFFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// 按环境变量定位并加载配置
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(password) = std::env::var(PASSWORD_ENV)
            && !password.is_empty()
        {
            config.auth.password = password;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("配置文件解析失败: {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("配置文件 {} 不存在，使用默认配置", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("配置文件读取失败: {}", path.display()))
            }
        }
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn workers(&self) -> usize {
        if self.server.workers == 0 {
            num_cpus::get()
        } else {
            self.server.workers
        }
    }
}
