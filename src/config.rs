use std::path::PathBuf;

use crate::cache::CacheConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/workers.json";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_url: String,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_path: std::env::var("WORKERS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            api_url: std::env::var("WORKHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            cache: CacheConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
