//! Core trait definitions for question sources.
//!
//! Implemented by the `quizline-providers` crate.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{Category, Question, QuestionRequest};

/// A backend that serves trivia questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch one batch of questions. A failure yields no questions at all.
    async fn fetch_questions(&self, request: &QuestionRequest) -> Result<Vec<Question>, FetchError>;

    /// List the categories this source can serve.
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;
}
