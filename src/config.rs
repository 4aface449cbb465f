//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 区块浏览器 API 配置
///
/// 配置文件中缺省的字段取环境变量或默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub base_url: String,
    /// 单次请求超时（毫秒），超时等同于账户数据不可用
    pub timeout_ms: u64,
    /// 代币列表分页大小（只取第一页）
    pub token_page_limit: u32,
    pub user_agent: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

fn default_user_agent() -> String {
    format!("ironscan/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("TRONSCAN_API_URL")
                .unwrap_or_else(|_| "https://apilist.tronscan.org".into()),
            timeout_ms: std::env::var("EXPLORER_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),
            token_page_limit: std::env::var("EXPLORER_TOKEN_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Environment,
    File(PathBuf),
    /// 指定的配置文件不存在，已回退到环境变量
    MissingFile(PathBuf),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Environment => tracing::debug!("Configuration loaded from environment"),
            ConfigSource::File(path) => {
                tracing::info!(path = ?path, "Configuration loaded from file")
            }
            ConfigSource::MissingFile(path) => {
                tracing::warn!(path = ?path, "Config file not found, using environment")
            }
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            explorer: ExplorerConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let (config, source) = Self::load(path)?;
        source.log();
        Ok(config)
    }

    /// 同 `from_env_and_file`，但不写日志，由调用方在日志初始化后调用 `ConfigSource::log`
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<(Self, ConfigSource)> {
        let Some(path) = path else {
            return Ok((Self::from_env()?, ConfigSource::Environment));
        };

        let path = path.as_ref();
        if path.exists() {
            Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::from_env()?, ConfigSource::MissingFile(path.to_path_buf())))
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if !self.explorer.base_url.starts_with("http://")
            && !self.explorer.base_url.starts_with("https://")
        {
            anyhow::bail!("TRONSCAN_API_URL must start with http:// or https://");
        }

        if self.explorer.timeout_ms == 0 {
            anyhow::bail!("EXPLORER_TIMEOUT_MS must be greater than 0");
        }

        if !(1..=200).contains(&self.explorer.token_page_limit) {
            anyhow::bail!("EXPLORER_TOKEN_LIMIT must be between 1 and 200");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
