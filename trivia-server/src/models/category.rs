//! Quiz categories

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Category row, serialized as `{"id": 1, "type": "Science"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// The reference categories inserted by `trivia seed`.
pub const DEFAULT_CATEGORIES: [(i32, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

/// Validated category id (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(i32);

impl CategoryId {
    /// # Example
    /// ```
    /// use trivia_server::models::CategoryId;
    ///
    /// assert!(CategoryId::new(2).is_ok());
    /// assert!(CategoryId::new(0).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        match i32::try_from(id) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ValidationError::OutOfRange {
                field: "category",
                min: 1,
                max: i32::MAX as i64,
                value: id,
            }),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}
