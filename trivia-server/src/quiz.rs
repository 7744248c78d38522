//! Quiz question selection
//!
//! A quiz session lives entirely on the client: every request carries the
//! category filter and the ids already shown. The server builds the pool,
//! drops excluded ids and draws one question uniformly at random. An empty
//! pool means the quiz is over for that filter.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::db::{StoreError, TriviaStore};
use crate::models::{CategoryId, Question};

/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Category(CategoryId),
}

impl CategoryFilter {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            Self::Any => true,
            Self::Category(id) => question.category == id.get(),
        }
    }
}

/// Why no question could be selected
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("no unseen questions left")]
    Exhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Pick one question from `pool` whose id is not in `excluded`.
///
/// Every remaining question is equally likely. Returns `None` when nothing
/// is left after exclusion.
pub fn select_next<R>(pool: Vec<Question>, excluded: &HashSet<i32>, rng: &mut R) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let mut eligible: Vec<Question> = pool
        .into_iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let idx = rng.gen_range(0..eligible.len());
    Some(eligible.swap_remove(idx))
}

/// Shared random source for quiz draws.
///
/// Cloning shares the same generator. Seed it for reproducible sequences.
#[derive(Clone)]
pub struct QuizRng {
    inner: Arc<Mutex<StdRng>>,
}

impl QuizRng {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic mid-draw leaves the generator usable.
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for QuizRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for QuizRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizRng").finish_non_exhaustive()
    }
}

/// Load the pool for `filter`, ordered by id.
pub async fn load_pool(
    store: &dyn TriviaStore,
    filter: CategoryFilter,
) -> Result<Vec<Question>, StoreError> {
    match filter {
        CategoryFilter::Any => store.all_questions().await,
        CategoryFilter::Category(id) => store.questions_in_category(id).await,
    }
}

/// Select the next quiz question for a session.
pub async fn next_question(
    store: &dyn TriviaStore,
    filter: CategoryFilter,
    excluded: &HashSet<i32>,
    rng: &QuizRng,
) -> Result<Question, QuizError> {
    let pool = load_pool(store, filter).await?;
    let pool_size = pool.len();

    let question = rng
        .with(|rng| select_next(pool, excluded, rng))
        .ok_or(QuizError::Exhausted)?;

    tracing::debug!(
        ?filter,
        pool_size,
        excluded = excluded.len(),
        question_id = question.id,
        "Selected quiz question"
    );
    Ok(question)
}
