use std::time::Duration;

use anyhow::{Context, Result};
use importer::RetryPolicy;
use importer::retry::{DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};
use importer::sources::football_data::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub football_data_base_url: String,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let max_attempts = match std::env::var("FOOTBALL_DATA_MAX_ATTEMPTS") {
            Ok(value) => value
                .parse()
                .context("FOOTBALL_DATA_MAX_ATTEMPTS must be a number")?,
            Err(_) => DEFAULT_MAX_ATTEMPTS,
        };
        let backoff = match std::env::var("FOOTBALL_DATA_BACKOFF_SECS") {
            Ok(value) => Duration::from_secs(
                value
                    .parse()
                    .context("FOOTBALL_DATA_BACKOFF_SECS must be a number of seconds")?,
            ),
            Err(_) => DEFAULT_BACKOFF,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            football_data_base_url: std::env::var("FOOTBALL_DATA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            retry: RetryPolicy::new(max_attempts, backoff),
        })
    }
}
