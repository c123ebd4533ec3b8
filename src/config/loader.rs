//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容变量 `DATABASE_URL` / `FRONT_END_URL`
//! 2. 环境变量（前缀 `PRODUCT_API_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

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
/// # 环境变量示例
/// - `PRODUCT_API_SERVER__PORT=4000`
/// - `PRODUCT_API_LOG__LEVEL=debug`
/// - `DATABASE_URL=sqlite:/data/products.db?mode=rwc`
/// - `FRONT_END_URL=http://localhost:5173`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_overrides(
        config_path,
        std::env::var("DATABASE_URL").ok(),
        std::env::var("FRONT_END_URL").ok(),
    )
}

fn load_with_overrides(
    config_path: Option<&Path>,
    database_url: Option<String>,
    front_end_url: Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("database.url", "sqlite:data/products.db?mode=rwc")?
        .set_default("database.max_connections", 5)?
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

    // 3. 环境变量，例如: PRODUCT_API_DATABASE__URL=sqlite::memory:
    builder = builder.add_source(
        Environment::with_prefix("PRODUCT_API")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 兼容变量（最高优先级）
    builder = builder
        .set_override_option("database.url", database_url)?
        .set_override_option("cors.front_end_url", front_end_url)?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database URL cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max_connections cannot be 0".to_string(),
        ));
    }

    if let Some(origin) = &config.cors.front_end_url {
        if origin.is_empty() {
            return Err(ConfigError::ValidationError(
                "Front-end URL cannot be empty".to_string(),
            ));
        }
        if http::HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Front-end URL is not a valid origin: {}",
                origin
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Database: {}", config.database.url);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    match &config.cors.front_end_url {
        Some(origin) => tracing::info!("CORS Allowed Origin: {}", origin),
        None => tracing::warn!("CORS Allowed Origin: <unset>, cross-origin requests will be rejected"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
