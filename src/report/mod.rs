use std::fmt::Write;
use std::path::Path;
use std::time::Duration;

use crate::pipeline::types::Outcome;

/// Aggregate result of one batch, built once at run end.
#[derive(Debug)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration: Duration,
    /// `(display path, failure reason)` in original outcome order.
    pub failures: Vec<(String, String)>,
}

/// Partition outcomes by success. Pure, no I/O.
pub fn summarize(outcomes: &[Outcome], duration: Duration) -> RunSummary {
    let failures: Vec<(String, String)> = outcomes
        .iter()
        .filter(|o| !o.succeeded())
        .map(|o| {
            (
                o.item.display.clone(),
                o.failure_reason().unwrap_or_default().to_string(),
            )
        })
        .collect();

    let failed = failures.len();
    RunSummary {
        total: outcomes.len(),
        succeeded: outcomes.len() - failed,
        failed,
        duration,
        failures,
    }
}

/// The final summary block shown after a run.
pub fn render(summary: &RunSummary, concurrency: usize, output_dir: &Path) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();

    writeln!(out, "{rule}").ok();
    writeln!(out, "SUMMARY").ok();
    writeln!(out, "{rule}").ok();
    writeln!(out, "Total files: {}", summary.total).ok();
    writeln!(out, "Successful: {}", summary.succeeded).ok();
    writeln!(out, "Failed: {}", summary.failed).ok();
    writeln!(out, "Duration: {:.2}s", summary.duration.as_secs_f64()).ok();
    writeln!(out, "Concurrency: {concurrency}").ok();
    writeln!(out, "Output directory: {}", output_dir.display()).ok();

    if !summary.failures.is_empty() {
        writeln!(out, "\nFailed reviews:").ok();
        for (path, reason) in &summary.failures {
            writeln!(out, "  - {path}: {reason}").ok();
        }
    }

    out
}
