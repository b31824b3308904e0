//! The `quizline categories` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizline_providers::config::load_config_from;
use quizline_providers::create_source;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config)?;

    let mut categories = source
        .list_categories()
        .await
        .map_err(|e| anyhow::anyhow!("failed to list categories: {e}"))?;

    if categories.is_empty() {
        println!("No categories available from {}.", source.name());
        return Ok(());
    }
    categories.sort_by_key(|c| c.id);

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category"]);
    for category in &categories {
        let name = if Some(category.id) == config.default_category {
            format!("{} (default)", category.name)
        } else {
            category.name.clone()
        };
        table.add_row(vec![Cell::new(category.id), Cell::new(name)]);
    }

    println!("{table}");
    println!("\nStart a quiz with: quizline play --category <ID>");

    Ok(())
}
