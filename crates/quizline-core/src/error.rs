//! Question fetch error types.
//!
//! Defined in `quizline-core` so the session can store the last failure and
//! front ends can pick a message and retry policy without string matching.

use std::time::Duration;

use thiserror::Error;

use crate::model::CategoryId;

/// API response code: results returned.
pub const RESPONSE_OK: i64 = 0;
/// API response code: not enough questions for the query.
pub const RESPONSE_NO_RESULTS: i64 = 1;
/// API response code: too many requests from this address.
pub const RESPONSE_RATE_LIMITED: i64 = 5;

/// Errors that can occur when fetching questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API reported that no questions match the query.
    #[error("no questions found for category {0}")]
    NoResultsForCategory(CategoryId),

    /// The API reported a non-zero response code other than "no results".
    #[error("unexpected API response code {code}")]
    UnexpectedApiError { code: i64 },

    /// The endpoint returned HTTP 404.
    #[error("question endpoint not found (HTTP 404)")]
    NotFound,

    /// Any other request failure: network, timeout, HTTP status, bad body.
    #[error("transport failure: {0}")]
    TransportFailure(String),
}

impl FetchError {
    /// Message shown to the user alongside the retry control.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NoResultsForCategory(_) => "No questions found for this category",
            FetchError::UnexpectedApiError { .. } => "An unexpected error occurred.",
            FetchError::NotFound => "No questions available for the selected category.",
            FetchError::TransportFailure(_) => "Failed to fetch questions. Please try again.",
        }
    }

    /// How long to wait before retrying, if the source asked for a pause.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            FetchError::UnexpectedApiError {
                code: RESPONSE_RATE_LIMITED,
            } => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    /// Map a non-success API response code to its error.
    pub fn from_response_code(code: i64, category: CategoryId) -> Self {
        if code == RESPONSE_NO_RESULTS {
            FetchError::NoResultsForCategory(category)
        } else {
            FetchError::UnexpectedApiError { code }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(
            FetchError::NoResultsForCategory(CategoryId(9)).user_message(),
            "No questions found for this category"
        );
        assert_eq!(
            FetchError::UnexpectedApiError { code: 2 }.user_message(),
            "An unexpected error occurred."
        );
        assert_eq!(
            FetchError::NotFound.user_message(),
            "No questions available for the selected category."
        );
        assert_eq!(
            FetchError::TransportFailure("connection refused".into()).user_message(),
            "Failed to fetch questions. Please try again."
        );
    }

    #[test]
    fn response_code_mapping() {
        assert_eq!(
            FetchError::from_response_code(1, CategoryId(11)),
            FetchError::NoResultsForCategory(CategoryId(11))
        );
        assert_eq!(
            FetchError::from_response_code(3, CategoryId(11)),
            FetchError::UnexpectedApiError { code: 3 }
        );
    }

    #[test]
    fn only_rate_limit_has_retry_hint() {
        assert_eq!(
            FetchError::UnexpectedApiError { code: 5 }.retry_after(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(FetchError::UnexpectedApiError { code: 2 }.retry_after(), None);
        assert_eq!(FetchError::NotFound.retry_after(), None);
    }
}
