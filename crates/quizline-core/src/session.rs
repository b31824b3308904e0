//! Quiz session state machine.
//!
//! `QuizSession` owns the fetched questions, the current position, the
//! selected answers and the final score. Every update is a plain method on
//! the struct; the only asynchronous step (the fetch) happens outside and is
//! fed back through [`QuizSession::complete_load`].
//!
//! ```text
//! Idle -> Loading -> Ready -> ... -> Completed
//!            |                          |
//!            v                          | restart
//!         Failed -- retry --> Loading <-+
//! ```

use std::collections::BTreeMap;

use crate::error::FetchError;
use crate::model::{CategoryId, Question};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, nothing requested yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Questions are loaded and the user is stepping through them.
    Ready,
    /// The last fetch failed; waiting for a retry.
    Failed,
    /// The user advanced past the last question and a score is set.
    Completed,
}

/// Handed out when a load starts. Only the result for the most recent ticket
/// of the current category is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the ticket is needed to apply the fetch result"]
pub struct FetchTicket {
    seq: u64,
    category: CategoryId,
}

impl FetchTicket {
    /// Category this load was issued for.
    pub fn category(&self) -> CategoryId {
        self.category
    }
}

/// Count the questions whose recorded selection equals the correct answer.
/// Unanswered questions count as incorrect.
pub fn score_answers(questions: &[Question], selections: &BTreeMap<usize, String>) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            selections
                .get(index)
                .is_some_and(|answer| question.is_correct(answer))
        })
        .count()
}

/// State of one run through a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: CategoryId,
    questions: Vec<Question>,
    current: usize,
    selections: BTreeMap<usize, String>,
    score: Option<usize>,
    loading: bool,
    error: Option<FetchError>,
    seq: u64,
}

impl QuizSession {
    /// An empty session for `category`. Nothing is requested until
    /// [`begin_load`](Self::begin_load).
    pub fn new(category: CategoryId) -> Self {
        Self {
            category,
            questions: Vec::new(),
            current: 0,
            selections: BTreeMap::new(),
            score: None,
            loading: false,
            error: None,
            seq: 0,
        }
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question at the current position, if any are loaded.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// The answer recorded for `index`, if any.
    pub fn selected(&self, index: usize) -> Option<&str> {
        self.selections.get(&index).map(String::as_str)
    }

    pub fn selections(&self) -> &BTreeMap<usize, String> {
        &self.selections
    }

    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Whether the current position is the last question.
    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.current == self.questions.len() - 1
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.score.is_some() {
            Phase::Completed
        } else if !self.questions.is_empty() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Switch to another category. Drops all state and invalidates any
    /// outstanding ticket.
    pub fn set_category(&mut self, category: CategoryId) {
        let seq = self.seq + 1;
        *self = Self::new(category);
        self.seq = seq;
    }

    /// Mark a fetch as started and return the ticket its result must carry.
    pub fn begin_load(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.seq,
            category: self.category,
        }
    }

    /// Apply the outcome of a fetch. Returns `false` if the ticket is stale
    /// and the result was discarded.
    pub fn complete_load(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Question>, FetchError>,
    ) -> bool {
        if ticket.seq != self.seq || ticket.category != self.category {
            tracing::debug!(
                ticket_category = %ticket.category,
                current_category = %self.category,
                "discarding stale fetch result"
            );
            return false;
        }

        self.loading = false;
        self.current = 0;
        self.selections.clear();
        self.score = None;

        match result {
            Ok(questions) if questions.is_empty() => {
                self.questions.clear();
                self.error = Some(FetchError::NoResultsForCategory(self.category));
            }
            Ok(questions) => {
                self.questions = questions;
                self.error = None;
            }
            Err(e) => {
                self.questions.clear();
                self.error = Some(e);
            }
        }
        true
    }

    /// Record `answer` for the question at `index`, replacing any earlier
    /// selection. The answer is not checked against the question's options.
    pub fn select_answer(&mut self, index: usize, answer: impl Into<String>) {
        if self.score.is_some() {
            return;
        }
        self.selections.insert(index, answer.into());
    }

    /// Record `answer` for the current question.
    pub fn select_current(&mut self, answer: impl Into<String>) {
        self.select_answer(self.current, answer);
    }

    /// Move to the next question, or finish the quiz from the last one.
    pub fn advance(&mut self) {
        if self.phase() != Phase::Ready {
            return;
        }
        if self.current < self.questions.len() - 1 {
            self.current += 1;
        } else {
            let score = score_answers(&self.questions, &self.selections);
            tracing::info!(
                category = %self.category,
                score,
                total = self.questions.len(),
                "quiz completed"
            );
            self.score = Some(score);
        }
    }

    /// Move to the previous question. No-op at the first question and after
    /// completion.
    pub fn retreat(&mut self) {
        if self.phase() != Phase::Ready {
            return;
        }
        if self.current > 0 {
            self.current -= 1;
        }
    }

    /// Clear the error and start the identical fetch again.
    pub fn retry(&mut self) -> FetchTicket {
        self.begin_load()
    }

    /// Reset to the initial empty state for the same category and start a
    /// new fetch.
    pub fn restart(&mut self) -> FetchTicket {
        self.set_category(self.category);
        self.begin_load()
    }
}
