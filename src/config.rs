use crate::error::{AppError, Result};

/// Category assigned to readings that arrive without one, and the default
/// filter on the read path.
pub const DEFAULT_CATEGORY: &str = "monitor";

/// Gap value stored when the upstream workflow did not compute one.
pub const DEFAULT_BRECHA_BS: &str = "0.00";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub db_path: String,
    pub log_level: String,
    /// Directory holding the pre-built dashboard bundle (STATIC_DIR).
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self {
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "monitor.db".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string()),
        })
    }
}
