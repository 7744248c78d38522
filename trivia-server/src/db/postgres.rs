//! PostgreSQL store
//!
//! - list: single query with `COUNT(*) OVER()` for the page total
//! - delete: `RETURNING` instead of check-then-delete

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::store::{StoreError, TriviaStore};
use crate::models::{Category, CategoryId, NewQuestion, Paginated, Pagination, Question, SearchTerm};

/// Store backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, type FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn questions_page(&self, page: Pagination) -> Result<Paginated<Question>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                question,
                answer,
                category,
                difficulty,
                COUNT(*) OVER() AS total
            FROM questions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit() as i64)
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .into_iter()
            .map(|r| Question {
                id: r.get("id"),
                question: r.get("question"),
                answer: r.get("answer"),
                category: r.get("category"),
                difficulty: r.get("difficulty"),
            })
            .collect();

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn search_questions(&self, term: &SearchTerm) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(term.like_pattern())
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(new.question.as_str())
        .bind(new.answer.as_str())
        .bind(new.category.get())
        .bind(new.difficulty.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM questions WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, migrations, DbSettings};
    use crate::models::{AnswerText, Difficulty, QuestionText};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&DbSettings::new(url)).await.expect("connect failed");
        migrations::seed_categories(&pool).await.expect("seed failed");
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_delete_removes_question() {
        let store = store().await;
        let created = store
            .insert_question(NewQuestion {
                question: QuestionText::new("Which planet is known as the Red Planet?").unwrap(),
                answer: AnswerText::new("Mars").unwrap(),
                category: CategoryId::new(1).unwrap(),
                difficulty: Difficulty::new(1).unwrap(),
            })
            .await
            .unwrap();

        store.delete_question(created.id).await.unwrap();

        let remaining = store.all_questions().await.unwrap();
        assert!(remaining.iter().all(|q| q.id != created.id));
        assert!(matches!(
            store.delete_question(created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_treats_wildcards_literally() {
        let store = store().await;
        let term = SearchTerm::new("%").unwrap();
        let hits = store.search_questions(&term).await.unwrap();
        assert!(hits.iter().all(|q| q.question.contains('%')));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn seeded_categories_are_listed_in_order() {
        let store = store().await;
        let categories = store.categories().await.unwrap();
        let ids: Vec<i32> = categories.iter().map(|c| c.id).take(6).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
