//! Connecting to the trivia database
//!
//! Every entry point (`serve`, `migrate`, `seed`) needs the schema in place
//! before it touches a table, so [`connect`] runs the idempotent bootstrap
//! right after the pool comes up.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::migrations;

/// Pool size used when `--max-connections` isn't given.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing with 422.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how wide to connect
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DbSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        // A zero-sized pool can never hand out a connection.
        self.max_connections = max_connections.max(1);
        self
    }
}

/// Open a pool and make sure the trivia tables exist.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&DbSettings::new("postgres://localhost/trivia")).await?;
/// let store = PgStore::new(pool);
/// ```
pub async fn connect(settings: &DbSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&settings.url)
        .await?;

    migrations::run(&pool).await?;
    tracing::info!(
        max_connections = settings.max_connections,
        "Connected to trivia database"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_and_clamp() {
        let settings = DbSettings::new("postgres://localhost/trivia");
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(settings.with_max_connections(0).max_connections, 1);
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p trivia-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connect_bootstraps_schema() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&DbSettings::new(url)).await.expect("connect failed");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .expect("questions table missing");

        assert!(count >= 0);
    }
}
