pub mod categories;
pub mod fetch;
pub mod init;
pub mod play;

use anyhow::Result;

use quizline_core::model::CategoryId;
use quizline_providers::QuizlineConfig;

/// Category from the command line, falling back to the configured default.
pub(crate) fn resolve_category(
    category: Option<CategoryId>,
    config: &QuizlineConfig,
) -> Result<CategoryId> {
    category.or(config.default_category).ok_or_else(|| {
        anyhow::anyhow!(
            "no category given; pass --category or set default_category in quizline.toml"
        )
    })
}
