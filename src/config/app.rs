use anyhow::{ensure, Context, Result};
use std::env;

use super::AiServiceConfig;

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_EXPIRES_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_expires_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
    pub ai: AiServiceConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "jwt-secret-key".to_string());
        let jwt_expires_hours: i64 = env::var("JWT_EXPIRES_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .context("JWT_EXPIRES_HOURS must be an integer")?;
        ensure!(
            (1..=MAX_JWT_EXPIRES_HOURS).contains(&jwt_expires_hours),
            "JWT_EXPIRES_HOURS must be between 1 and {MAX_JWT_EXPIRES_HOURS}, got {jwt_expires_hours}"
        );
        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(cost) => cost.parse().context("BCRYPT_COST must be an integer")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:5000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(environment == "development");

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            jwt_expires_hours,
            bcrypt_cost,
            cors_origins,
            seed_demo_data,
            ai: AiServiceConfig::from_env()?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
