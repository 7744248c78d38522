//! trivia-server: REST API for the trivia quiz
//!
//! Serves categories and questions with pagination, search, creation and
//! deletion, plus the quiz endpoint that draws a random unseen question.

pub mod db;
pub mod http;
pub mod models;
pub mod quiz;

pub use db::{MemoryStore, PgStore, StoreError, TriviaStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use quiz::{CategoryFilter, QuizRng};
