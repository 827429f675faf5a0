//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 后端 API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 凭证存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 导航配置
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 运行环境
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 运行环境，决定使用哪个后端地址
    #[serde(default)]
    pub environment: Environment,

    /// 开发环境后端地址
    #[serde(default = "default_development_url")]
    pub development_url: String,

    /// 生产环境后端地址
    #[serde(default = "default_production_url")]
    pub production_url: String,

    /// 请求超时时间（秒），未设置时使用传输层默认行为
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_development_url() -> String {
    "http://localhost:1111".to_string()
}

fn default_production_url() -> String {
    "https://api.marketdesk.az".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            development_url: default_development_url(),
            production_url: default_production_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// 当前环境对应的后端地址
    pub fn base_url(&self) -> &str {
        match self.environment {
            Environment::Development => &self.development_url,
            Environment::Production => &self.production_url,
        }
    }
}

/// 凭证存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// sled 数据库目录
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "data/credentials.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// 导航配置
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// 401 时跳转的登录页
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.environment, Environment::Development);
        assert_eq!(config.api.base_url(), "http://localhost:1111");
        assert_eq!(config.navigation.login_path, "/login");
        assert!(config.api.timeout_secs.is_none());
    }

    #[test]
    fn test_production_base_url() {
        let config = ApiConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://api.marketdesk.az");
    }

    #[test]
    fn test_environment_aliases() {
        let env: Environment = serde_json::from_str(r#""prod""#).unwrap();
        assert_eq!(env, Environment::Production);
    }
}
