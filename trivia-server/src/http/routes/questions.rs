//! Question endpoints: paged listing, create, delete, search

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::common::{current_category, LenientInt};
use crate::db::StoreError;
use crate::http::error::ApiError;
use crate::http::extractors::{PageParam, QuestionId};
use crate::http::server::AppState;
use crate::models::{
    AnswerText, Category, CategoryId, Difficulty, NewQuestion, Question, QuestionText, SearchTerm,
};

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub questions: Vec<Question>,
    pub total: i64,
    pub categories: Vec<Category>,
    pub currentcategory: Option<i32>,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    pub category: LenientInt,
    pub difficulty: LenientInt,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub created: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub delete_id: i32,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub questions: Vec<Question>,
    pub total: usize,
    pub currentcategory: Option<i32>,
    pub success: bool,
}

/// GET /questions?page=N - ten questions per page, ordered by id
async fn list_questions(
    State(state): State<Arc<AppState>>,
    PageParam(page): PageParam,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let result = state.store.questions_page(page).await?;
    if result.is_empty() {
        return Err(ApiError::NotFound {
            resource: "question page",
            id: page.page.to_string(),
        });
    }

    let categories = state.store.categories().await?;

    Ok(Json(QuestionPageResponse {
        currentcategory: current_category(result.items.iter()),
        questions: result.items,
        total: result.total,
        categories,
        success: true,
    }))
}

impl CreateQuestionRequest {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let category = self
            .category
            .value()
            .ok_or_else(|| ApiError::unprocessable("category is not an integer"))?;
        let difficulty = self
            .difficulty
            .value()
            .ok_or_else(|| ApiError::unprocessable("difficulty is not an integer"))?;

        Ok(NewQuestion {
            question: QuestionText::new(&self.question)?,
            answer: AnswerText::new(&self.answer)?,
            category: CategoryId::new(category)?,
            difficulty: Difficulty::new(difficulty)?,
        })
    }
}

/// POST /questions
async fn create_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let new = req.validate()?;

    let created = state.store.insert_question(new).await?;
    tracing::info!(
        id = created.id,
        category = created.category,
        "Created question"
    );

    Ok(Json(CreateQuestionResponse {
        created: created.id,
        question: created.question,
        answer: created.answer,
        category: created.category,
        difficulty: created.difficulty,
        success: true,
    }))
}

/// DELETE /questions/{id} - a missing id is unprocessable, not 404
async fn delete_question(
    State(state): State<Arc<AppState>>,
    QuestionId(raw): QuestionId,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let missing = |id: String| ApiError::unprocessable(format!("question '{}' does not exist", id));

    let id = i32::try_from(raw).map_err(|_| missing(raw.to_string()))?;
    state
        .store
        .delete_question(id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound { id, .. } => missing(id),
            other => other.into(),
        })?;

    tracing::info!(id, "Deleted question");
    Ok(Json(DeleteQuestionResponse {
        delete_id: id,
        success: true,
    }))
}

/// POST /questions/search
async fn search_questions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    // Empty terms never reach the store.
    let term = SearchTerm::new(&req.search_term).map_err(|_| ApiError::NotFound {
        resource: "search term",
        id: String::new(),
    })?;

    let questions = state.store.search_questions(&term).await?;
    if questions.is_empty() {
        return Err(ApiError::unprocessable(format!(
            "no question matches '{}'",
            term.as_str()
        )));
    }

    Ok(Json(SearchResponse {
        total: questions.len(),
        currentcategory: current_category(questions.iter()),
        questions,
        success: true,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
