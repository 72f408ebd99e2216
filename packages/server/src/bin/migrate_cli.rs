//! CLI for applying and inspecting schema migrations
//!
//! Outputs JSON so scripts can parse the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use chrono::{DateTime, Utc};
use meetup_core::config::Config;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI for the meetup store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Migrate,

    /// List migrations and whether each has been applied
    Status,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_on: Option<DateTime<Utc>>,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,meetup_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = config.connect().await?;

    match cli.command {
        Commands::Migrate => cmd_migrate(&pool).await,
        Commands::Status => cmd_status(&pool).await,
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_migrate(pool: &sqlx::PgPool) -> Result<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    output(&Response {
        success: true,
        message: Some("Migrations applied".to_string()),
        migrations: None,
    })
}

async fn cmd_status(pool: &sqlx::PgPool) -> Result<()> {
    let applied: Vec<(i64, DateTime<Utc>)> = match sqlx::query_as(
        "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await
    {
        Ok(rows) => rows,
        // A fresh database has no bookkeeping table yet
        Err(e) if is_undefined_table(&e) => Vec::new(),
        Err(e) => return Err(e).context("Failed to read applied migrations"),
    };

    let migrations = sqlx::migrate!("./migrations")
        .iter()
        .map(|m| MigrationInfo {
            version: m.version,
            description: m.description.to_string(),
            installed_on: applied
                .iter()
                .find(|(version, _)| *version == m.version)
                .map(|(_, at)| *at),
        })
        .collect::<Vec<_>>();

    let pending = migrations.iter().filter(|m| m.installed_on.is_none()).count();
    output(&Response {
        success: true,
        message: Some(format!("{} pending", pending)),
        migrations: Some(migrations),
    })
}

/// Postgres `undefined_table`.
fn is_undefined_table(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01"))
}
