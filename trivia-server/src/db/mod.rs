//! Database layer - connection pool, schema and stores
//!
//! Handlers only see the [`TriviaStore`] trait; [`PgStore`] is the
//! production backend and [`MemoryStore`] backs tests and demos.

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{connect, DbSettings};
pub use postgres::PgStore;
pub use store::{StoreError, TriviaStore};
