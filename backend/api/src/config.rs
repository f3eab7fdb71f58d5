//! Application configuration loaded from environment variables.

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret used to sign and verify session tokens
    pub jwt_secret: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// Lifetime of an issued token, in seconds
    pub token_ttl_secs: i64,
    /// Username of the demo account created at startup
    pub admin_username: String,
    /// Plain-text password of the demo account (hashed before storage)
    pub admin_password: String,
    /// bcrypt cost factor for password hashes
    pub bcrypt_cost: u32,
    /// Number of mock clients generated at startup
    pub seed_clients: u32,
    /// Number of mock avales generated at startup
    pub seed_avales: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            jwt_secret: env_var("JWT_SECRET").map_err(|_| {
                ApiError::Config("JWT_SECRET environment variable is required".to_string())
            })?,
            api_port: env_var("API_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid API_PORT".to_string()))?,
            token_ttl_secs: env_var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid TOKEN_TTL_SECS".to_string()))?,
            admin_username: env_var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env_var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string()),
            bcrypt_cost: env_var("BCRYPT_COST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid BCRYPT_COST".to_string()))?,
            seed_clients: env_var("SEED_CLIENTS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid SEED_CLIENTS".to_string()))?,
            seed_avales: env_var("SEED_AVALES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid SEED_AVALES".to_string()))?,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ApiError::Config(format!("Missing env var: {key}")))
}
