/// Configuration management for Trending Service
///
/// Everything is read from environment variables (a `.env` file is loaded
/// first by `main`).
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::services::RankingConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub trending: TrendingConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Trending list pagination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    pub default_per_page: usize,
    pub max_per_page: usize,
}

impl From<&TrendingConfig> for RankingConfig {
    fn from(config: &TrendingConfig) -> Self {
        RankingConfig {
            default_per_page: config.default_per_page,
            max_per_page: config.max_per_page,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("TRENDING_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("TRENDING_SERVICE_PORT", 8085)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/devshare".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            trending: {
                let default_per_page = parse_env_or_default("TRENDING_DEFAULT_PER_PAGE", 10)?;
                let max_per_page = parse_env_or_default("TRENDING_MAX_PER_PAGE", 50)?;

                if default_per_page == 0 || max_per_page == 0 {
                    return Err("Trending page sizes must be greater than zero".to_string());
                }
                if default_per_page > max_per_page {
                    return Err(format!(
                        "TRENDING_DEFAULT_PER_PAGE ({}) exceeds TRENDING_MAX_PER_PAGE ({})",
                        default_per_page, max_per_page
                    ));
                }

                TrendingConfig {
                    default_per_page,
                    max_per_page,
                }
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }

    /// Allowed CORS origins, trimmed, empty entries dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors
            .allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
