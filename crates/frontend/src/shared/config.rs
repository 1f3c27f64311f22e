use anyhow::Context;
use serde::Deserialize;

use super::local_storage;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub images: ImageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Префикс ключей localStorage; пустой по умолчанию ("items", "categories", "users")
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImageConfig {
    pub max_bytes: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Info)
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[storage]
prefix = ""

[images]
max_bytes = 5242880

[logging]
level = "debug"
"#;

/// localStorage key holding an optional TOML override
pub const CONFIG_OVERRIDE_KEY: &str = "app_config";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                prefix: String::new(),
            },
            images: ImageConfig {
                max_bytes: 5 * 1024 * 1024,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    toml::from_str(contents).context("failed to parse config TOML")
}

/// Load configuration
///
/// Search order:
/// 1. TOML override stored in localStorage under `app_config`
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    match local_storage::get_raw(CONFIG_OVERRIDE_KEY) {
        Some(contents) => parse_config(&contents),
        None => parse_config(DEFAULT_CONFIG),
    }
}
