//! Quiz play endpoint

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::LenientInt;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CategoryId, Question};
use crate::quiz::{self, CategoryFilter};

/// `type` the web client sends for "all categories"
const ALL_CATEGORIES_TYPE: &str = "click";

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<Value>,
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question: Question,
    pub success: bool,
}

/// Interpret `quiz_category`.
///
/// - `"any"` / `"click"` → any category
/// - `{"id": 0, ..}` or `{"type": "click"}` → any category
/// - `{"id": N, ..}` with N > 0 (number or numeric string) → category N
/// - anything else, including `null` → bad request
pub fn parse_category_filter(raw: Option<&Value>) -> Result<CategoryFilter, ApiError> {
    let raw = match raw {
        None | Some(Value::Null) => return Err(ApiError::bad_request("quiz_category is required")),
        Some(raw) => raw,
    };

    match raw {
        Value::String(s)
            if s.eq_ignore_ascii_case("any") || s.eq_ignore_ascii_case(ALL_CATEGORIES_TYPE) =>
        {
            Ok(CategoryFilter::Any)
        }
        Value::Object(map) => {
            let id = match map.get("id") {
                None | Some(Value::Null) => None,
                Some(v) => Some(
                    serde_json::from_value::<LenientInt>(v.clone())
                        .ok()
                        .and_then(|n| n.value())
                        .ok_or_else(|| ApiError::bad_request("quiz_category.id is not an integer"))?,
                ),
            };

            match id {
                Some(0) => Ok(CategoryFilter::Any),
                Some(id) => CategoryId::new(id)
                    .map(CategoryFilter::Category)
                    .map_err(|e| ApiError::bad_request(e.to_string())),
                None if map.get("type").and_then(Value::as_str) == Some(ALL_CATEGORIES_TYPE) => {
                    Ok(CategoryFilter::Any)
                }
                None => Err(ApiError::bad_request("quiz_category has no id")),
            }
        }
        other => Err(ApiError::bad_request(format!(
            "unsupported quiz_category: {}",
            other
        ))),
    }
}

/// POST /quizzes - next unseen question, 404 once the pool is exhausted
async fn next_quiz_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let filter = parse_category_filter(req.quiz_category.as_ref())?;
    let previous: HashSet<i32> = req.previous_questions.unwrap_or_default().into_iter().collect();

    let question = quiz::next_question(state.store.as_ref(), filter, &previous, &state.rng).await?;

    Ok(Json(QuizResponse {
        question,
        success: true,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(next_quiz_question))
}
