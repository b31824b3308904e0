//! Completed-quiz reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CategoryId, Difficulty};
use crate::session::QuizSession;

/// Record of one finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the quiz was completed.
    pub completed_at: DateTime<Utc>,
    pub category: CategoryId,
    /// Category name as reported by the source, if any question carried one.
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub score: usize,
    pub total: usize,
    /// One entry per question, in session order.
    pub answers: Vec<AnswerReview>,
}

/// How the user answered one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReview {
    pub index: usize,
    pub prompt: String,
    pub correct_answer: String,
    /// `None` if the question was left unanswered.
    #[serde(default)]
    pub selected: Option<String>,
    pub correct: bool,
}

impl QuizReport {
    /// Build a report from a completed session. Returns `None` until a score
    /// is set.
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let score = session.score()?;
        let questions = session.questions();

        let answers = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = session.selected(index).map(str::to_string);
                let correct = selected
                    .as_deref()
                    .is_some_and(|answer| question.is_correct(answer));
                AnswerReview {
                    index,
                    prompt: question.prompt.clone(),
                    correct_answer: question.correct_answer.clone(),
                    selected,
                    correct,
                }
            })
            .collect();

        Some(Self {
            id: Uuid::new_v4(),
            completed_at: Utc::now(),
            category: session.category(),
            category_name: questions.first().map(|q| q.category.clone()),
            difficulty: questions.first().map(|q| q.difficulty),
            score,
            total: questions.len(),
            answers,
        })
    }

    /// Fraction of questions answered correctly, 0.0 to 1.0.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
