//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `MARKETDESK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `MARKETDESK_API__ENVIRONMENT=production`
/// - `MARKETDESK_API__DEVELOPMENT_URL=http://localhost:1111`
/// - `MARKETDESK_STORAGE__PATH=/var/lib/marketdesk/credentials.sled`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("api.environment", "development")?
        .set_default("api.development_url", "http://localhost:1111")?
        .set_default("api.production_url", "https://api.marketdesk.az")?
        .set_default("storage.path", "data/credentials.sled")?
        .set_default("navigation.login_path", "/login")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: MARKETDESK_API__ENVIRONMENT=production
    builder = builder.add_source(
        Environment::with_prefix("MARKETDESK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    for (name, url) in [
        ("development", &config.api.development_url),
        ("production", &config.api.production_url),
    ] {
        if url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "API {} URL cannot be empty",
                name
            )));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "API {} URL must start with http:// or https://: {}",
                name, url
            )));
        }
    }

    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "API timeout cannot be 0".to_string(),
        ));
    }

    if config.storage.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Credential storage path cannot be empty".to_string(),
        ));
    }

    if !config.navigation.login_path.starts_with('/') {
        return Err(ConfigError::ValidationError(
            "Login path must start with '/'".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Environment: {:?}", config.api.environment);
    tracing::info!("API Base URL: {}", config.api.base_url());
    match config.api.timeout_secs {
        Some(secs) => tracing::info!("API Timeout: {}s", secs),
        None => tracing::info!("API Timeout: transport default"),
    }
    tracing::info!("Credential Storage: {}", config.storage.path);
    tracing::info!("Login Path: {}", config.navigation.login_path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
