//! The `quizline fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizline_core::model::CategoryId;
use quizline_providers::config::load_config_from;
use quizline_providers::create_source;

pub async fn execute(category: Option<CategoryId>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let category = super::resolve_category(category, &config)?;
    let source = create_source(&config)?;

    let request = config.request_for(category);
    let questions = source.fetch_questions(&request).await.map_err(|e| {
        anyhow::anyhow!("{} ({e})", e.user_message())
    })?;

    let json = serde_json::to_string_pretty(&questions).context("failed to serialize questions")?;
    println!("{json}");
    eprintln!(
        "Fetched {} {} {} question(s) for category {}",
        questions.len(),
        request.difficulty,
        request.kind,
        request.category
    );

    Ok(())
}
