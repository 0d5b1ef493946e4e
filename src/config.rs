//! Application configuration
//!
//! All settings come from environment variables (a `.env` file is loaded by
//! `main` before this module is touched). The resolved configuration is
//! stored once in a process-wide `OnceLock` and shared read-only after that.

use std::env;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 外部访问地址，默认从 host/port 推导
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// sqlite / postgres / mysql
    pub backend: String,
    pub database_url: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    /// 为空则输出到控制台
    pub file: Option<String>,
    pub format: String,
    pub enable_rotation: bool,
    pub max_backups: u32,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub random_code_length: usize,
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    fn from_env() -> Self {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        AppConfig {
            server: ServerConfig {
                host,
                port,
                base_url,
            },
            database: DatabaseConfig {
                backend: env::var("DATABASE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
                database_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://tinylink.db?mode=rwc".to_string()),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
                enable_rotation: env::var("LOG_ROTATION")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(true),
                max_backups: env::var("LOG_MAX_BACKUPS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(7),
            },
            random_code_length: env::var("RANDOM_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        }
    }
}

/// Resolve the configuration from the environment (first call only).
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

/// Get the resolved configuration. Initializes from the environment if
/// `init_config` has not run yet, so tests can use it directly.
pub fn get_config() -> &'static AppConfig {
    init_config()
}
