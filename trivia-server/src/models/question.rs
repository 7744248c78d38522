//! Questions and their validated input fields

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{CategoryId, ValidationError};

/// Lowest accepted difficulty
pub const MIN_DIFFICULTY: i64 = 1;

/// Highest accepted difficulty
pub const MAX_DIFFICULTY: i64 = 5;

/// Question row as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Non-empty text field, trimmed.
fn non_empty(field: &'static str, s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Validated question text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionText(String);

impl QuestionText {
    /// # Example
    /// ```
    /// use trivia_server::models::QuestionText;
    ///
    /// assert!(QuestionText::new("Who painted the Mona Lisa?").is_ok());
    /// assert!(QuestionText::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        non_empty("question", s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated answer text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerText(String);

impl AnswerText {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        non_empty("answer", s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Difficulty score, 1 (easy) to 5 (hard)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(i32);

impl Difficulty {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: MIN_DIFFICULTY,
                max: MAX_DIFFICULTY,
                value,
            });
        }
        // Range check above keeps this in i32.
        Ok(Self(value as i32))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Search term matched case-insensitively against question text.
///
/// Blank terms are rejected, but an accepted term keeps its surrounding
/// whitespace: `"1 "` and `"1"` are different searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        non_empty("searchTerm", s)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the term as a literal substring.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// In-process equivalent of the `ILIKE` match.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// A question ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: QuestionText,
    pub answer: AnswerText,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}
