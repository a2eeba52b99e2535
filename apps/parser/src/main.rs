use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_parser::config::Config;
use resume_parser::input::read_input;
use resume_parser::llm_client::{LlmClient, LlmRefiner};
use resume_parser::refine::RefinementStage;
use resume_parser::ResumeExtractor;

#[derive(Parser, Debug)]
#[command(name = "resume-parser")]
#[command(version, about = "Extracts structured data from decoded résumé text")]
struct Args {
    /// Text file to parse; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Skip the LLM refinement pass even when enabled in the environment
    #[arg(long)]
    no_refine: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    // stdout carries the JSON result, so logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-parser v{}", env!("CARGO_PKG_VERSION"));

    let doc = read_input(args.input.as_deref()).context("failed to read input text")?;
    let extractor = ResumeExtractor::new(config.extractor_settings());

    let outcome = match refinement_stage(&config, args.no_refine) {
        Some(stage) => stage.process(&extractor, &doc).await,
        None => extractor.process(&doc),
    };

    let json = if args.compact {
        serde_json::to_string(&outcome)
    } else {
        serde_json::to_string_pretty(&outcome)
    }
    .context("failed to serialize extraction result")?;
    println!("{json}");
    Ok(())
}

/// The LLM stage when refinement is enabled and the client can be built.
fn refinement_stage(config: &Config, disabled: bool) -> Option<RefinementStage> {
    if disabled || !config.refinement_enabled() {
        return None;
    }
    let timeout = Duration::from_secs(config.refine_timeout_secs);
    match LlmClient::new(config.anthropic_api_key.clone(), config.llm_model.clone(), timeout) {
        Ok(client) => {
            info!(model = %config.llm_model, timeout_secs = config.refine_timeout_secs, "LLM refinement enabled");
            let settings = config.extractor_settings();
            Some(RefinementStage::new(
                Arc::new(LlmRefiner::new(client)),
                timeout,
                settings.dictionaries,
            ))
        }
        Err(e) => {
            warn!(error = %e, "LLM client unavailable, continuing without refinement");
            None
        }
    }
}
