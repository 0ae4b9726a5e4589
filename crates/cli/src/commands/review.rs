//! `deckproof review` — the model-driven review run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;

use deckproof_agent::ReviewLoop;
use deckproof_config::{API_KEY_VAR, ReviewConfig};
use deckproof_core::provider::Provider;
use deckproof_core::state::AgentState;
use deckproof_pptx::Package;
use deckproof_providers::{OpenAiCompatProvider, RetryProvider};

use super::default_output_path;

pub async fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    max_iterations: Option<u32>,
) -> anyhow::Result<()> {
    let mut config = ReviewConfig::load(config_path.as_deref())?;
    if let Some(max) = max_iterations {
        config.max_iterations = max;
    }

    // Check for the credential early — give a clear error before any work
    let api_key = match config.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            eprintln!();
            eprintln!("  ERROR: no API key configured!");
            eprintln!();
            eprintln!("  Set it in your environment:");
            eprintln!("    export {API_KEY_VAR}=sk-your-key-here");
            eprintln!();
            bail!(e);
        }
    };

    let output = output.unwrap_or_else(|| default_output_path(&input));

    // An unreadable document aborts before the loop starts.
    Package::open(&input)?;

    let http = Arc::new(OpenAiCompatProvider::with_timeout(
        "openai",
        &config.base_url,
        &api_key,
        Duration::from_secs(config.request_timeout_secs),
    ));
    let provider: Arc<dyn Provider> = Arc::new(RetryProvider::new(
        http,
        config.max_retries,
        Duration::from_secs(config.request_timeout_secs + 5),
    ));

    let agent = ReviewLoop::new(provider, &config);
    let mut state = AgentState::new(
        input.to_string_lossy().into_owned(),
        output.to_string_lossy().into_owned(),
    );

    let bar = "=".repeat(80);
    println!("{bar}");
    println!("POWERPOINT REVIEW AGENT");
    println!("{bar}");
    println!("Input: {}", state.presentation_path);
    println!("Output: {}", state.output_path);
    println!("Model: {}", config.model);
    println!("{bar}");

    let summary = agent.run(&mut state).await?;

    println!();
    println!("{bar}");
    println!("AGENT COMPLETED");
    println!("{bar}");
    println!("Iterations: {}", summary.iterations);
    if !summary.completed {
        println!("Note: iteration budget reached before the agent marked completion");
    }
    println!("Corrections Applied: {}", summary.corrections_applied);

    if !summary.details.is_empty() {
        println!();
        println!("Corrections:");
        for c in &summary.details {
            println!("  - Slide {}, {}: {}", c.slide_number, c.shape_name, c.category);
            println!("    '{}' -> '{}'", c.original_text, c.corrected_text);
            println!("    Reason: {}", c.reasoning);
        }
    }

    println!();
    println!("Output saved to: {}", summary.output_path);
    println!("{bar}");

    Ok(())
}
