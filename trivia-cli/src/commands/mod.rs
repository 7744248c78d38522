pub mod db;
pub mod serve;

use anyhow::{Context, Result};

pub use db::{run_migrate, run_seed};
pub use serve::run_serve;

/// Database URL from `--database-url` or DATABASE_URL (clap reads the env,
/// `.env` is loaded before parsing).
pub(crate) fn require_database_url(flag: Option<String>) -> Result<String> {
    flag.filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
}
