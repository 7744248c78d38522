//! Shared request payload helpers

use serde::Deserialize;

/// Integer sent either as a JSON number or as a numeric string
/// (the web client posts select-box values as strings).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LenientInt {
    Int(i64),
    Text(String),
}

impl LenientInt {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// The category a response is "currently" showing: the category of its
/// first question, or `None` for an empty list.
pub fn current_category<'a, I>(mut questions: I) -> Option<i32>
where
    I: Iterator<Item = &'a crate::models::Question>,
{
    questions.next().map(|q| q.category)
}
