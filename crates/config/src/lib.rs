//! mdmail-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use mdmail_errors::{AppError, AppResult};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

/// SMTP 认证信息
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub user: String,
    pub pass: Secret<String>,
}

/// SMTP 传输配置
///
/// 构造 Mailer 时原样交给传输工厂，之后不再修改
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    /// true 时使用隐式 TLS（通常是 465 端口），否则走 STARTTLS
    #[serde(default, alias = "secureConnection")]
    pub secure_connection: bool,
    pub auth: AuthConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl TransportConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        secure_connection: bool,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            secure_connection,
            auth: AuthConfig {
                user: user.into(),
                pass: Secret::new(pass.into()),
            },
            timeout_secs: default_timeout_secs(),
        }
    }

    /// 设置连接超时
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// 校验配置形状
    pub fn validate(&self) -> AppResult<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::validation("transport host must not be empty"));
        }
        if self.port == 0 {
            return Err(AppError::validation("transport port must not be 0"));
        }
        Ok(())
    }
}

/// 发信默认值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailerDefaults {
    /// 命令行未指定 --from 时使用
    pub default_from: Option<String>,
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输出 JSON 格式日志（生产环境）
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub smtp: TransportConfig,
    #[serde(default)]
    pub mailer: MailerDefaults,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_name() -> String {
    "mdmail".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级：环境变量 > `{APP_ENV}.toml` > `default.toml`，
    /// 环境变量前缀为 `MDMAIL_`，层级用 `__` 分隔，例如 `MDMAIL_SMTP__HOST`
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("MDMAIL_").split("__"));

        Self::from_figment(figment)
    }

    /// 从任意 figment 提取配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
