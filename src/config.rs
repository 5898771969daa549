//! Configuration management for the Bookshelf server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON document per collection
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    /// Accepted page sizes. Empty means any size up to `max_page_size`.
    pub allowed_page_sizes: Vec<usize>,
    pub max_page_size: usize,
}

/// Credentials of the administrator created by `GET /install`
#[derive(Debug, Deserialize, Clone)]
pub struct InstallConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKSHELF_AUTH__JWT_SECRET, BOOKSHELF_SERVER__PORT, ...
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("storage.data_dir", env::var("DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            allowed_page_sizes: vec![5, 10, 30],
            max_page_size: 100,
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            admin_email: "admin@example.com".to_string(),
        }
    }
}
