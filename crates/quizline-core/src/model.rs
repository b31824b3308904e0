//! Core data model types for quizline.
//!
//! These are the types every other part of quizline uses to describe
//! questions, categories, and what to ask a question source for.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of questions requested per session unless configured otherwise.
pub const DEFAULT_AMOUNT: u32 = 10;

/// Upper bound the trivia API accepts for `amount`.
pub const MAX_AMOUNT: u32 = 50;

/// Identifier selecting a topical subset of trivia questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(CategoryId)
            .map_err(|_| format!("invalid category id: '{}'", s.trim()))
    }
}

/// A category as listed by the question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Answer layout of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// One correct answer and three distractors.
    #[default]
    Multiple,
    /// True / False.
    Boolean,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Multiple => write!(f, "multiple"),
            QuestionKind::Boolean => write!(f, "boolean"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple" => Ok(QuestionKind::Multiple),
            "boolean" | "bool" => Ok(QuestionKind::Boolean),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single trivia question. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the user.
    pub prompt: String,
    /// The one correct answer.
    pub correct_answer: String,
    /// Incorrect answers shown alongside the correct one.
    pub distractors: Vec<String>,
    /// Human-readable category name.
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub kind: QuestionKind,
}

impl Question {
    /// All answer options, shuffled.
    pub fn options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut options = Vec::with_capacity(self.distractors.len() + 1);
        options.push(self.correct_answer.clone());
        options.extend(self.distractors.iter().cloned());
        options.shuffle(rng);
        options
    }

    /// Whether `answer` is the correct answer to this question.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// What to ask a question source for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub amount: u32,
    pub category: CategoryId,
    pub difficulty: Difficulty,
    pub kind: QuestionKind,
}

impl QuestionRequest {
    /// The fixed request a session issues: 10 easy multiple-choice questions.
    pub fn for_category(category: CategoryId) -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            category,
            difficulty: Difficulty::Easy,
            kind: QuestionKind::Multiple,
        }
    }

    /// Same parameters, different category.
    pub fn with_category(&self, category: CategoryId) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }
}
