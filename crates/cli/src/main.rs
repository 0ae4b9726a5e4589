//! deckproof CLI — the main entry point.
//!
//! Commands:
//! - `review`  — Model-driven review: extract, analyze, correct, save
//! - `fix`     — Fixed regex corrections, no model required
//! - `analyze` — Print every slide's text content for inspection

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod spellcheck;

#[derive(Parser)]
#[command(
    name = "deckproof",
    about = "deckproof — review and correct PowerPoint presentations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Review a presentation with the model-driven agent
    Review {
        /// Input .pptx file
        input: PathBuf,

        /// Output path; defaults to "<input>_corrected.pptx"
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the iteration budget
        #[arg(long)]
        max_iterations: Option<u32>,
    },

    /// Apply the built-in regex corrections without a model
    Fix {
        /// Input .pptx file
        input: PathBuf,

        /// Output path; defaults to "<input>_corrected.pptx"
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print all text content of a presentation
    Analyze {
        /// Input .pptx file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Review {
            input,
            output,
            config,
            max_iterations,
        } => commands::review::run(input, output, config, max_iterations).await?,
        Commands::Fix { input, output } => commands::fix::run(input, output)?,
        Commands::Analyze { input } => commands::analyze::run(input)?,
    }

    Ok(())
}
