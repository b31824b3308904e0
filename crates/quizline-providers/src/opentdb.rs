//! Open Trivia DB question source.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::instrument;

use quizline_core::error::{FetchError, RESPONSE_OK};
use quizline_core::model::{Category, CategoryId, Difficulty, Question, QuestionKind, QuestionRequest};
use quizline_core::traits::QuestionSource;

use crate::entities::decode_html_entities;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the opentdb.com REST API.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn questions_url(&self, request: &QuestionRequest) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &format!("{}/api.php", self.base_url),
            &[
                ("amount", request.amount.to_string()),
                ("category", request.category.to_string()),
                ("difficulty", request.difficulty.to_string()),
                ("type", request.kind.to_string()),
            ],
        )
        .map_err(|e| FetchError::TransportFailure(format!("invalid base URL: {e}")))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::TransportFailure(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                FetchError::TransportFailure(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::TransportFailure(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }
        Ok(response)
    }
}

#[derive(Deserialize)]
struct QuestionsResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<WireQuestion>,
}

#[derive(Deserialize)]
struct WireQuestion {
    #[serde(rename = "type", default)]
    kind: QuestionKind,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    category: String,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl From<WireQuestion> for Question {
    fn from(wire: WireQuestion) -> Self {
        Question {
            prompt: decode_html_entities(&wire.question),
            correct_answer: decode_html_entities(&wire.correct_answer),
            distractors: wire
                .incorrect_answers
                .iter()
                .map(|a| decode_html_entities(a))
                .collect(),
            category: decode_html_entities(&wire.category),
            difficulty: wire.difficulty,
            kind: wire.kind,
        }
    }
}

#[derive(Deserialize)]
struct CategoriesResponse {
    trivia_categories: Vec<WireCategory>,
}

#[derive(Deserialize)]
struct WireCategory {
    id: u32,
    name: String,
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self, request), fields(category = %request.category, amount = request.amount))]
    async fn fetch_questions(&self, request: &QuestionRequest) -> Result<Vec<Question>, FetchError> {
        let url = self.questions_url(request)?;
        tracing::debug!(%url, "fetching questions");

        let response = self.get(url).await?;
        let body: QuestionsResponse = response.json().await.map_err(|e| {
            FetchError::TransportFailure(format!("failed to parse response: {e}"))
        })?;

        if body.response_code != RESPONSE_OK {
            return Err(FetchError::from_response_code(
                body.response_code,
                request.category,
            ));
        }

        Ok(body.results.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = Url::parse(&format!("{}/api_category.php", self.base_url))
            .map_err(|e| FetchError::TransportFailure(format!("invalid base URL: {e}")))?;

        let response = self.get(url).await?;
        let body: CategoriesResponse = response.json().await.map_err(|e| {
            FetchError::TransportFailure(format!("failed to parse response: {e}"))
        })?;

        Ok(body
            .trivia_categories
            .into_iter()
            .map(|c| Category {
                id: CategoryId(c.id),
                name: decode_html_entities(&c.name),
            })
            .collect())
    }
}
