//! Configuration module for the label client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host of the backend (e.g. `http://127.0.0.1:8000`)
    pub api_url: String,
    /// Path prefix every endpoint lives under
    pub base_path: String,
    /// Path to the SQLite file backing the persistent token store
    pub token_db_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("LABEL_API_URL").unwrap_or_default();

        let base_path = env::var("LABEL_API_BASE_PATH").unwrap_or_else(|_| "/v1".to_string());

        let token_db_path = env::var("LABEL_TOKEN_DB_PATH")
            .unwrap_or_else(|_| "./data/session.sqlite".to_string())
            .into();

        let log_level = env::var("LABEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            base_path,
            token_db_path,
            log_level,
        }
    }

    /// The URL every request path is appended to.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.api_url, self.base_path)
            .trim_end_matches('/')
            .to_string()
    }
}
