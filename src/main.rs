//! Founder Profiler CLI entry point.
//!
//! Binary name: `founder-profiler`
//!
//! Reads a cleaned transcript document (`{"transcript": "..."}`), extracts a
//! founder profile through the configured completion service and writes it
//! as JSON into the output directory.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use founder_profiler::adapters::{LocalFounderStore, OpenAIConfig, OpenAIProvider, TiktokenTokenizer};
use founder_profiler::application::{
    Chunker, CompletionClient, ExtractFounderCommand, ExtractFounderHandler, FacetExtractor,
};
use founder_profiler::config::AppConfig;
use founder_profiler::domain::founder::Transcript;
use founder_profiler::ports::FounderStore;

/// Extract a structured founder profile from a transcript.
#[derive(Debug, Parser)]
#[command(name = "founder-profiler", version, about)]
struct Cli {
    /// Transcript JSON file: {"transcript": "..."}
    transcript: PathBuf,

    /// Directory the profile is written to (overrides configuration)
    #[arg(long, env = "FOUNDER_PROFILER_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(err) = run(cli).await {
        tracing::error!(error = %format!("{:#}", err), "extraction failed");
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let raw = tokio::fs::read_to_string(&cli.transcript)
        .await
        .with_context(|| format!("failed to read {}", cli.transcript.display()))?;
    let transcript: Transcript = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a transcript document", cli.transcript.display()))?;

    let api_key = config.ai.openai_api_key.clone().unwrap_or_default();
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?;

    let client = CompletionClient::new(Arc::new(provider)).with_max_attempts(config.ai.max_attempts);
    let extractor = FacetExtractor::new(client)
        .with_basic_info_excerpt_chars(config.extraction.basic_info_excerpt_chars);
    let tokenizer = TiktokenTokenizer::for_model(&config.ai.model)?;
    let chunker = Chunker::new(Arc::new(tokenizer), config.extraction.max_chunk_tokens)
    .with_oversize_policy(config.extraction.oversize_paragraph);
    let handler =
        ExtractFounderHandler::new(chunker, extractor).with_fan_out_policy(config.extraction.fan_out);

    let result = handler.handle(ExtractFounderCommand::new(transcript)).await?;

    let directory = cli.output_dir.unwrap_or(config.output.directory);
    let store = LocalFounderStore::new(directory);
    let source_name = cli.transcript.to_string_lossy();
    let path = store.save(&result.founder, &source_name).await?;

    tracing::info!(
        run_id = %result.run_id,
        failed_facets = result.failed_facets.len(),
        "done"
    );
    println!("{}", path.display());
    Ok(())
}
