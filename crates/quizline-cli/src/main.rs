//! quizline CLI — terminal trivia quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizline_core::model::CategoryId;

mod commands;

#[derive(Parser)]
#[command(name = "quizline", version, about = "Terminal trivia quiz backed by Open Trivia DB")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz interactively
    Play {
        /// Category id (see `quizline categories`)
        #[arg(long)]
        category: Option<CategoryId>,

        /// Write a JSON report for each completed quiz to the results directory
        #[arg(long)]
        save: bool,

        /// Seed for answer shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch one batch of questions and print it as JSON
    Fetch {
        /// Category id
        #[arg(long)]
        category: Option<CategoryId>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available categories
    Categories {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizline=warn".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            category,
            save,
            seed,
            config,
        } => commands::play::execute(category, save, seed, config).await,
        Commands::Fetch { category, config } => commands::fetch::execute(category, config).await,
        Commands::Categories { config } => commands::categories::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
