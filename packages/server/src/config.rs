use anyhow::{Context, Result};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

use crate::kernel::LoggingNotifier;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Host used to build edit/view links in notification emails
    pub server_hostname: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            server_hostname: env::var("SERVER_HOSTNAME")
                .unwrap_or_else(|_| "localhost".to_string()),
        })
    }

    /// Open the shared connection pool.
    pub async fn connect(&self) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(self.database_max_connections)
            .connect(&self.database_url)
            .await
            .context("Failed to connect to database")
    }

    /// Notifier that renders change-event emails with links to
    /// `server_hostname` and logs them.
    pub fn notifier(&self) -> LoggingNotifier {
        LoggingNotifier::new(self.server_hostname.clone())
    }
}
