//! HTTP server command
//!
//! Runs the trivia API against PostgreSQL, or against an in-memory store
//! seeded with the reference categories when `--in-memory` is given.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{connect, pool::DEFAULT_MAX_CONNECTIONS, DbSettings};
use trivia_server::{run_server, AppState, MemoryStore, PgStore, QuizRng, ServerConfig, TriviaStore};

use super::require_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TRIVIA_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Serve from an in-memory store instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Seed for quiz question draws, for reproducible runs
    #[arg(long, env = "TRIVIA_QUIZ_SEED")]
    pub quiz_seed: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn TriviaStore> = if args.in_memory {
        if args.database_url.is_some() {
            tracing::info!("--in-memory given; ignoring DATABASE_URL");
        }
        tracing::warn!("Using in-memory store; changes are discarded on shutdown");
        Arc::new(MemoryStore::with_default_categories())
    } else {
        let settings = DbSettings::new(require_database_url(args.database_url)?)
            .with_max_connections(args.max_connections);
        let pool = connect(&settings)
            .await
            .context("Failed to connect and migrate")?;
        Arc::new(PgStore::new(pool))
    };

    let rng = match args.quiz_seed {
        Some(seed) => {
            tracing::info!(seed, "Quiz draws are seeded");
            QuizRng::seeded(seed)
        }
        None => QuizRng::from_entropy(),
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting trivia server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(AppState::new(store, rng), config)
        .await
        .context("Server error")?;

    Ok(())
}
