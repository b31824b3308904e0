//! Configuration loading and question source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizline_core::model::{CategoryId, Difficulty, QuestionKind, QuestionRequest, MAX_AMOUNT};
use quizline_core::traits::QuestionSource;

use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level quizline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizlineConfig {
    /// Base URL of the trivia API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Questions per session.
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    /// Category used when none is given on the command line.
    #[serde(default)]
    pub default_category: Option<CategoryId>,
    /// Where completed-quiz reports are written.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_amount() -> u32 {
    quizline_core::model::DEFAULT_AMOUNT
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("./quizline-results")
}

impl Default for QuizlineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            amount: default_amount(),
            difficulty: Difficulty::default(),
            kind: QuestionKind::default(),
            default_category: None,
            results_dir: default_results_dir(),
        }
    }
}

impl QuizlineConfig {
    /// Check value ranges the API would otherwise reject.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=MAX_AMOUNT).contains(&self.amount),
            "amount must be between 1 and {MAX_AMOUNT}, got {}",
            self.amount
        );
        anyhow::ensure!(self.timeout_secs >= 1, "timeout_secs must be at least 1");
        anyhow::ensure!(!self.base_url.is_empty(), "base_url must not be empty");
        Ok(())
    }

    /// The request a session issues for `category` under this config.
    pub fn request_for(&self, category: CategoryId) -> QuestionRequest {
        QuestionRequest {
            amount: self.amount,
            category,
            difficulty: self.difficulty,
            kind: self.kind,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `quizline.toml` in the current directory
/// 2. `~/.config/quizline/config.toml`
///
/// Environment variable override: `QUIZLINE_BASE_URL`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizlineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizline.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizlineConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizlineConfig::default(),
    };

    if let Ok(url) = std::env::var("QUIZLINE_BASE_URL") {
        config.base_url = url;
    }
    config.base_url = resolve_env_vars(&config.base_url);

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizline"))
}

/// Create the question source described by `config`.
pub fn create_source(config: &QuizlineConfig) -> Result<Arc<dyn QuestionSource>> {
    let source = OpenTdbSource::new(Some(config.base_url.clone()), config.timeout_secs)?;
    tracing::debug!(base_url = source.base_url(), "using opentdb source");
    Ok(Arc::new(source))
}
