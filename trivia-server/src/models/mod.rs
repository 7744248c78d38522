//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod category;
pub mod pagination;
pub mod question;
pub mod validation;

pub use category::{Category, CategoryId, DEFAULT_CATEGORIES};
pub use pagination::{Paginated, Pagination, PAGE_SIZE};
pub use question::{AnswerText, Difficulty, NewQuestion, Question, QuestionText, SearchTerm};
pub use validation::ValidationError;
