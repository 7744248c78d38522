//! In-process store for tests and `serve --in-memory`

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{StoreError, TriviaStore};
use crate::models::{
    Category, CategoryId, NewQuestion, Paginated, Pagination, Question, SearchTerm,
    DEFAULT_CATEGORIES,
};

#[derive(Debug, Default)]
struct Inner {
    categories: Vec<Category>,
    /// Keyed by id so iteration order is id order.
    questions: BTreeMap<i32, Question>,
    next_id: i32,
}

/// Store holding everything in memory. Ids are assigned like a SERIAL column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with categories and questions (ids kept as given).
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let mut sorted = categories;
        sorted.sort_by_key(|c| c.id);
        let questions: BTreeMap<i32, Question> =
            questions.into_iter().map(|q| (q.id, q)).collect();
        let next_id = questions.keys().next_back().map_or(1, |id| id + 1);

        Self {
            inner: RwLock::new(Inner {
                categories: sorted,
                questions,
                next_id,
            }),
        }
    }

    /// Store with the six reference categories and no questions.
    pub fn with_default_categories() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(id, kind)| Category::new(*id, *kind))
            .collect();
        Self::with_data(categories, Vec::new())
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn questions_page(&self, page: Pagination) -> Result<Paginated<Question>, StoreError> {
        let inner = self.inner.read().await;
        let all: Vec<Question> = inner.questions.values().cloned().collect();
        Ok(Paginated::from_slice(&all, page))
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.inner.read().await.questions.values().cloned().collect())
    }

    async fn questions_in_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| q.category == category.get())
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &SearchTerm) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| term.matches(&q.question))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id.max(1);
        inner.next_id = id + 1;

        let question = Question {
            id,
            question: new.question.as_str().to_owned(),
            answer: new.answer.as_str().to_owned(),
            category: new.category.get(),
            difficulty: new.difficulty.get(),
        };
        inner.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            })
    }
}
