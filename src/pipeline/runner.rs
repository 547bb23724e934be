use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::pipeline::stats::RunStats;
use crate::pipeline::types::{Outcome, WorkItem};

/// Turns one work item into an outcome.
///
/// Implementations must fold every failure into the returned outcome;
/// the runner never sees an error or a panic from this boundary.
#[async_trait]
pub trait ItemProcessor: Send + Sync + 'static {
    async fn process(&self, item: WorkItem) -> Outcome;
}

/// Receives each outcome as soon as it completes, so results land on
/// disk incrementally rather than only at the end of the batch.
#[async_trait]
pub trait OutcomeSink: Send + Sync {
    /// Persist the outcome, returning where it was written (if anywhere).
    async fn persist(&self, outcome: &Outcome) -> Option<PathBuf>;
}

/// Drives a batch of work items with at most `concurrency` processor
/// invocations in flight at any instant.
///
/// Items are dispatched in input order; completions interleave in
/// whatever order the review service answers. All bookkeeping happens
/// in the single task that consumes completions, so no locking is
/// needed around the results or the stats.
pub struct Runner<P> {
    processor: Arc<P>,
    sink: Arc<dyn OutcomeSink>,
    concurrency: usize,
}

impl<P: ItemProcessor> Runner<P> {
    pub fn new(processor: Arc<P>, sink: Arc<dyn OutcomeSink>, concurrency: usize) -> Self {
        Self {
            processor,
            sink,
            concurrency: concurrency.max(1),
        }
    }

    /// Process every item, returning one outcome per input item.
    ///
    /// A failed item is recorded and the batch continues; nothing is
    /// retried and nothing short-circuits the run.
    pub async fn run(&self, items: Vec<WorkItem>) -> Vec<Outcome> {
        let mut stats = RunStats::new(items.len());
        let mut outcomes = Vec::with_capacity(items.len());
        let mut in_flight: JoinSet<(Outcome, Duration)> = JoinSet::new();

        for item in items {
            while in_flight.len() >= self.concurrency {
                if let Some(joined) = in_flight.join_next().await {
                    self.complete(joined, &mut stats, &mut outcomes).await;
                }
            }

            let processor = Arc::clone(&self.processor);
            in_flight.spawn(async move {
                let started = Instant::now();
                let outcome = processor.process(item).await;
                (outcome, started.elapsed())
            });
        }

        while let Some(joined) = in_flight.join_next().await {
            self.complete(joined, &mut stats, &mut outcomes).await;
        }

        outcomes
    }

    async fn complete(
        &self,
        joined: std::result::Result<(Outcome, Duration), tokio::task::JoinError>,
        stats: &mut RunStats,
        outcomes: &mut Vec<Outcome>,
    ) {
        let (outcome, item_time) = match joined {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Review task failed to join");
                return;
            }
        };

        stats.completed += 1;

        let location = self.sink.persist(&outcome).await;

        let marker = if outcome.succeeded() { "✓" } else { "✗" };
        let eta = stats.eta().map(|d| d.as_secs()).unwrap_or(0);
        let saved = location
            .map(|p| format!(" → {}", p.display()))
            .unwrap_or_default();
        println!(
            "{marker} [{completed}/{total}] {display} ({item_secs:.2}s, ETA: {eta}s){saved}",
            completed = stats.completed,
            total = stats.total,
            display = outcome.item.display,
            item_secs = item_time.as_secs_f64(),
        );

        outcomes.push(outcome);
    }
}
