//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use luxehome_core::LuxeConfig;
use luxehome_server::db::migrations;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create profiles, properties and leads tables if missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = LuxeConfig::load();
    let pool = super::connect(&config, args.database_url.as_deref()).await?;

    migrations::run(&pool).await.context("Migration failed")?;

    println!("✓ Schema up to date ({} statements)", migrations::STATEMENTS.len());
    Ok(())
}
