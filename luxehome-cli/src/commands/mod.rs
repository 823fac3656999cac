//! Command implementations for the luxehome CLI

pub mod migrate;
pub mod sanitize;
pub mod score;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use luxehome_core::LuxeConfig;
use luxehome_server::create_pool_with_options;
use sqlx::PgPool;

// Re-export dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use sanitize::run_sanitize;
pub use score::run_score;
pub use seed::run_seed;
pub use serve::run_serve;

/// Open a pool using `database_url` if given, else the configured URL.
async fn connect(config: &LuxeConfig, database_url: Option<&str>) -> Result<PgPool> {
    let url = match database_url {
        Some(url) => url,
        None => config.database_url()?,
    };
    create_pool_with_options(url, config.database.max_connections)
        .await
        .context("Failed to create database pool")
}
