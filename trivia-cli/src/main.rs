//! trivia CLI - run and bootstrap the trivia quiz API
//!
//! - `serve`: HTTP API (PostgreSQL or `--in-memory`)
//! - `migrate`: create tables
//! - `seed`: create tables and insert the reference categories

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "trivia",
    author,
    version,
    about = "REST API for the trivia quiz: categories, questions and quiz play"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the categories and questions tables if missing
    Migrate(commands::db::DbArgs),
    /// Run migrations and insert the six reference categories
    Seed(commands::db::DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(cli.debug).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }

    Ok(())
}
