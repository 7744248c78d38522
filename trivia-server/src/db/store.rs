//! Store trait shared by the Postgres and in-memory backends

use async_trait::async_trait;

use crate::models::{Category, CategoryId, NewQuestion, Paginated, Pagination, Question, SearchTerm};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Persistence for categories and questions.
///
/// Every list is ordered by id.
#[async_trait]
pub trait TriviaStore: Send + Sync + 'static {
    /// All categories.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// One page of all questions, with the overall total.
    async fn questions_page(&self, page: Pagination) -> Result<Paginated<Question>, StoreError>;

    /// Every question.
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// Questions whose `category` equals `category`.
    async fn questions_in_category(&self, category: CategoryId)
        -> Result<Vec<Question>, StoreError>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &SearchTerm) -> Result<Vec<Question>, StoreError>;

    /// Insert and return the stored row.
    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError>;

    /// Delete by id. Missing ids yield [`StoreError::NotFound`].
    async fn delete_question(&self, id: i32) -> Result<(), StoreError>;
}
