//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidCategoryId;
use crate::http::server::AppState;
use crate::models::{Category, Question};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub questions: Vec<Question>,
    pub total: usize,
    pub category_id: i32,
    /// Category name, when the id is a known category
    pub current_category: Option<String>,
    pub success: bool,
}

/// GET /categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.store.categories().await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound {
            resource: "categories",
            id: "*".to_owned(),
        });
    }

    Ok(Json(CategoriesResponse {
        categories,
        success: true,
    }))
}

/// GET /categories/{id}/questions
async fn questions_for_category(
    State(state): State<Arc<AppState>>,
    ValidCategoryId(category): ValidCategoryId,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let questions = state.store.questions_in_category(category).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound {
            resource: "category questions",
            id: category.get().to_string(),
        });
    }

    let name = state
        .store
        .categories()
        .await?
        .into_iter()
        .find(|c| c.id == category.get())
        .map(|c| c.kind);

    Ok(Json(CategoryQuestionsResponse {
        total: questions.len(),
        questions,
        category_id: category.get(),
        current_category: name,
        success: true,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
