use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AnnouncementConfig {
    pub common: core_config::Config,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Invalid STORE_BACKEND: {}. Must be one of: mongodb, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl AnnouncementConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let backend: StoreBackend = get_env("STORE_BACKEND", Some("mongodb"), false)?.parse()?;
        // The connection string carries credentials, so it is never defaulted.
        let uri = match backend {
            StoreBackend::MongoDb => get_env("MONGODB_URI", None, is_prod)?,
            StoreBackend::Memory => env::var("MONGODB_URI").unwrap_or_default(),
        };

        Ok(AnnouncementConfig {
            common: common_config,
            store: StoreConfig {
                backend,
                mongodb: MongoConfig {
                    uri,
                    database: get_env("MONGODB_DATABASE", Some("test"), false)?,
                    collection: get_env("MONGODB_COLLECTION", Some("announcements"), false)?,
                },
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
