//! Mock question source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizline_core::error::FetchError;
use quizline_core::model::{Category, CategoryId, Difficulty, Question, QuestionKind, QuestionRequest};
use quizline_core::traits::QuestionSource;

type FetchResult = Result<Vec<Question>, FetchError>;

/// A question source that replays scripted results without network access.
///
/// Queued results are returned in order; once the queue is empty every call
/// gets the fallback result.
pub struct MockSource {
    /// Results returned by the next calls, front first.
    queue: Mutex<VecDeque<FetchResult>>,
    /// Returned when the queue is empty.
    fallback: FetchResult,
    categories: Vec<Category>,
    /// Number of fetch calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<QuestionRequest>>,
}

impl MockSource {
    /// A source that answers every fetch with `questions`.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self::with_fallback(Ok(questions))
    }

    /// A source that fails every fetch with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self::with_fallback(Err(error))
    }

    /// A source that replays `results` in order, then keeps returning the
    /// last one.
    pub fn scripted(results: Vec<FetchResult>) -> Self {
        let fallback = results
            .last()
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()));
        let mut source = Self::with_fallback(fallback);
        source.queue = Mutex::new(results.into());
        source
    }

    fn with_fallback(fallback: FetchResult) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            categories: Vec::new(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Set the categories returned by `list_categories`.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Get the number of fetch calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this source.
    pub fn last_request(&self) -> Option<QuestionRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_questions(&self, request: &QuestionRequest) -> Result<Vec<Question>, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        let next = self
            .queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        Ok(self.categories.clone())
    }
}

/// `n` generated multiple-choice questions whose correct answers are
/// `"answer-0"`, `"answer-1"`, ...
pub fn sample_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            prompt: format!("Sample question {}?", i + 1),
            correct_answer: format!("answer-{i}"),
            distractors: vec![
                format!("distractor-{i}-a"),
                format!("distractor-{i}-b"),
                format!("distractor-{i}-c"),
            ],
            category: "General Knowledge".into(),
            difficulty: Difficulty::Easy,
            kind: QuestionKind::Multiple,
        })
        .collect()
}

/// A small fixed category list.
pub fn sample_categories() -> Vec<Category> {
    vec![
        Category {
            id: CategoryId(9),
            name: "General Knowledge".into(),
        },
        Category {
            id: CategoryId(18),
            name: "Science: Computers".into(),
        },
        Category {
            id: CategoryId(23),
            name: "History".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_questions() {
        let source = MockSource::with_questions(sample_questions(3));
        let request = QuestionRequest::for_category(CategoryId(9));

        let questions = source.fetch_questions(&request).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.last_request(), Some(request));
    }

    #[tokio::test]
    async fn scripted_results_then_last_repeats() {
        let source = MockSource::scripted(vec![
            Err(FetchError::NotFound),
            Ok(sample_questions(2)),
        ]);
        let request = QuestionRequest::for_category(CategoryId(9));

        assert_eq!(
            source.fetch_questions(&request).await.unwrap_err(),
            FetchError::NotFound
        );
        assert_eq!(source.fetch_questions(&request).await.unwrap().len(), 2);
        assert_eq!(source.fetch_questions(&request).await.unwrap().len(), 2);
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn categories() {
        let source = MockSource::failing(FetchError::NotFound)
            .with_categories(sample_categories());
        let categories = source.list_categories().await.unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[1].id, CategoryId(18));
    }
}
