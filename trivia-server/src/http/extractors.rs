//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{CategoryId, Pagination};

/// Parse an integer path segment; anything else is treated as an unknown route.
async fn int_path<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<i64, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::NotFound {
            resource,
            id: String::new(),
        })?;

    raw.parse::<i64>().map_err(|_| ApiError::NotFound { resource, id: raw })
}

/// Question id from `/questions/{id}`.
///
/// Any integer is accepted; ids outside the `i32` range simply don't exist.
pub struct QuestionId(pub i64);

impl<S> FromRequestParts<S> for QuestionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        int_path(parts, state, "question").await.map(Self)
    }
}

/// Category id from `/categories/{id}/...`
pub struct ValidCategoryId(pub CategoryId);

impl<S> FromRequestParts<S> for ValidCategoryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = int_path(parts, state, "category").await?;
        let id = CategoryId::new(id).map_err(|_| ApiError::NotFound {
            resource: "category",
            id: id.to_string(),
        })?;
        Ok(Self(id))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    page: Option<String>,
}

/// `?page=N`, falling back to page 1 when missing or not a number
#[derive(Debug, Clone, Copy)]
pub struct PageParam(pub Pagination);

impl<S> FromRequestParts<S> for PageParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = Query::<RawPage>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();

        let page = raw
            .page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1);

        Ok(Self(Pagination::new(page)))
    }
}
