//! Async quiz controller.
//!
//! Pairs a [`QuizSession`] with the [`QuestionSource`] that feeds it. The
//! fetch is the only await point; every other operation is a synchronous
//! update on the session.

use std::sync::Arc;

use tracing::instrument;

use crate::model::{CategoryId, QuestionRequest};
use crate::session::{FetchTicket, Phase, QuizSession};
use crate::traits::QuestionSource;

/// Drives one quiz session against a question source.
pub struct QuizController {
    source: Arc<dyn QuestionSource>,
    request: QuestionRequest,
    session: QuizSession,
}

impl QuizController {
    /// Controller using the fixed session request (10 easy multiple-choice
    /// questions) for `category`.
    pub fn new(source: Arc<dyn QuestionSource>, category: CategoryId) -> Self {
        Self::with_request(source, QuestionRequest::for_category(category))
    }

    /// Controller with custom request parameters.
    pub fn with_request(source: Arc<dyn QuestionSource>, request: QuestionRequest) -> Self {
        Self {
            session: QuizSession::new(request.category),
            source,
            request,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// The request issued for the current category.
    pub fn request(&self) -> &QuestionRequest {
        &self.request
    }

    /// Load questions for `category`, switching categories if needed.
    pub async fn load_questions(&mut self, category: CategoryId) -> Phase {
        if category != self.session.category() {
            self.session.set_category(category);
            self.request = self.request.with_category(category);
        }
        let ticket = self.session.begin_load();
        self.fetch(ticket).await
    }

    /// Clear the error and re-issue the identical request.
    pub async fn retry(&mut self) -> Phase {
        let ticket = self.session.retry();
        self.fetch(ticket).await
    }

    /// Reset the session and fetch a fresh set of questions.
    pub async fn restart(&mut self) -> Phase {
        let ticket = self.session.restart();
        self.fetch(ticket).await
    }

    pub fn select_answer(&mut self, index: usize, answer: impl Into<String>) {
        self.session.select_answer(index, answer);
    }

    pub fn select_current(&mut self, answer: impl Into<String>) {
        self.session.select_current(answer);
    }

    pub fn advance(&mut self) {
        self.session.advance();
    }

    pub fn retreat(&mut self) {
        self.session.retreat();
    }

    #[instrument(skip(self, ticket), fields(source = self.source.name(), category = %self.request.category))]
    async fn fetch(&mut self, ticket: FetchTicket) -> Phase {
        let request = self.request.with_category(ticket.category());
        let result = self.source.fetch_questions(&request).await;
        match &result {
            Ok(questions) => tracing::info!(count = questions.len(), "questions loaded"),
            Err(e) => tracing::warn!("question fetch failed: {e}"),
        }
        self.session.complete_load(ticket, result);
        self.session.phase()
    }
}
