use config::{Config, ConfigError, File};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// `COURSEWARE_*` 环境变量与配置键的对应关系
///
/// 键名本身含下划线，不能按分隔符自动拆分。
const ENV_KEYS: &[(&str, &str)] = &[
    ("COURSEWARE_APP_ENVIRONMENT", "app.environment"),
    ("COURSEWARE_APP_LOG_LEVEL", "app.log_level"),
    ("COURSEWARE_DATABASE_URL", "database.url"),
    ("COURSEWARE_DATABASE_POOL_SIZE", "database.pool_size"),
    ("COURSEWARE_DATABASE_TIMEOUT", "database.timeout"),
];

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&std::env::vars().collect())
    }

    /// 使用给定的环境变量加载配置
    pub fn load_from(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let app_env = vars
            .get("APP_ENV")
            .cloned()
            .unwrap_or_else(|| "development".into());

        let mut builder = Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "courseware.db")?
            .set_default("database.pool_size", 5)?
            .set_default("database.timeout", 30)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(File::with_name(&format!("config.{app_env}")).required(false));

        // 环境变量覆盖
        for (var, key) in ENV_KEYS {
            builder = builder.set_override_option(*key, vars.get(*var).cloned())?;
        }

        builder = builder
            .set_override_option("app.environment", vars.get("APP_ENV").cloned())?
            .set_override_option("app.log_level", vars.get("RUST_LOG").cloned())?
            .set_override_option("database.url", vars.get("DATABASE_URL").cloned())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}
