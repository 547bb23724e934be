pub mod runner;
pub mod stats;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::discovery::{self, Source};
use crate::error::{AppError, Result};
use crate::output::sink::ReviewSink;
use crate::report::{self, RunSummary};
use crate::review::client::ClaudeClient;
use crate::review::processor::ReviewProcessor;
use runner::Runner;

/// Discover work items, review them under the concurrency cap, and
/// print the final summary. An empty work list is a successful no-op.
pub async fn run_review(
    config: &AppConfig,
    root: &std::path::Path,
    source: Source,
    concurrency: usize,
) -> Result<RunSummary> {
    let items = discovery::discover(root, &source, &config.discovery).await?;
    println!("Found {} file(s) to review", items.len());

    if items.is_empty() {
        println!("No files to review. Exiting.");
        return Ok(report::summarize(&[], Duration::ZERO));
    }

    if config.claude.api_key.is_empty() {
        return Err(AppError::Config(
            "claude.api_key is required (set HYPHA__CLAUDE__API_KEY or the config file)"
                .to_string(),
        ));
    }

    println!("Using concurrency limit: {concurrency}\n");

    let client = ClaudeClient::new(&config.claude);
    let processor = Arc::new(ReviewProcessor::new(client));
    let sink = Arc::new(ReviewSink::new(
        config.output.dir.clone(),
        config.discovery.target_filename.clone(),
    ));

    let runner = Runner::new(processor, sink, concurrency);

    let started = Instant::now();
    let outcomes = runner.run(items).await;
    let summary = report::summarize(&outcomes, started.elapsed());

    println!("\n{}", report::render(&summary, concurrency, &config.output.dir));

    Ok(summary)
}
