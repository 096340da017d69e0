//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use scaffold_infra::DatabaseConfig;
use thiserror::Error;

use crate::paging::PagingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub paging: PagingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name -> value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if url::Url::parse(&url).is_err() {
            return Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                value: url,
            });
        }

        let mut database = DatabaseConfig::new(url);
        database.max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 100)?;
        database.min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", 10)?;
        database.sqlx_logging = parse_or(&lookup, "DB_SQLX_LOGGING", true)?;
        if database.min_connections > database.max_connections {
            return Err(ConfigError::Invalid {
                name: "DB_MIN_CONNECTIONS",
                value: database.min_connections.to_string(),
            });
        }

        let defaults = PagingConfig::default();
        let paging = PagingConfig {
            default_items_per_page: parse_or(
                &lookup,
                "ITEMS_PER_PAGE",
                defaults.default_items_per_page,
            )?,
            max_items_per_page: parse_or(&lookup, "MAX_ITEMS_PER_PAGE", defaults.max_items_per_page)?,
        };
        if paging.default_items_per_page > paging.max_items_per_page {
            return Err(ConfigError::Invalid {
                name: "ITEMS_PER_PAGE",
                value: paging.default_items_per_page.to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database,
            paging,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
