//! quizline-providers — Trivia question sources.
//!
//! Implements the `QuestionSource` trait for Open Trivia DB and a scripted
//! mock, plus configuration loading.

pub mod config;
pub mod entities;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config_from, QuizlineConfig};
pub use opentdb::OpenTdbSource;
