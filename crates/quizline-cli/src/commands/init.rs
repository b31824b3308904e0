//! The `quizline init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizline.toml").exists() {
        println!("quizline.toml already exists, skipping.");
    } else {
        std::fs::write("quizline.toml", SAMPLE_CONFIG)?;
        println!("Created quizline.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizline categories");
    println!("  2. Set default_category in quizline.toml, or pass --category");
    println!("  3. Run: quizline play --category 9");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizline configuration

base_url = "https://opentdb.com"
timeout_secs = 30

# Questions per quiz (1-50)
amount = 10
# easy, medium, hard
difficulty = "easy"
# multiple, boolean
type = "multiple"

# default_category = 9
results_dir = "./quizline-results"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizline_providers::QuizlineConfig;

    #[test]
    fn sample_config_parses_to_defaults() {
        let config: QuizlineConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.amount, 10);
        assert!(config.default_category.is_none());
        assert!(config.validate().is_ok());
    }
}
