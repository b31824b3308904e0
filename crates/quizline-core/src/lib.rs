//! quizline-core — Quiz session state machine, question model, and scoring.
//!
//! This crate defines the data model, the question source trait, the fetch
//! error taxonomy, and the session logic the rest of quizline builds on.

pub mod controller;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod traits;

pub use controller::QuizController;
pub use error::FetchError;
pub use session::{Phase, QuizSession};
