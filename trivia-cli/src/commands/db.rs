//! Schema and reference-data commands

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{connect, migrations, DbSettings};

use super::require_database_url;

/// Arguments shared by `migrate` and `seed`
#[derive(Parser, Debug)]
pub struct DbArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create tables and indexes
pub async fn run_migrate(args: DbArgs) -> Result<()> {
    let url = require_database_url(args.database_url)?;
    connect(&DbSettings::new(url))
        .await
        .context("Failed to connect and migrate")?;

    println!("Schema is up to date");
    Ok(())
}

/// Create tables, then insert the reference categories
pub async fn run_seed(args: DbArgs) -> Result<()> {
    let url = require_database_url(args.database_url)?;
    let pool = connect(&DbSettings::new(url))
        .await
        .context("Failed to connect and migrate")?;
    let inserted = migrations::seed_categories(&pool)
        .await
        .context("Failed to seed categories")?;

    println!("Inserted {} categories", inserted);
    Ok(())
}
