use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::error::Result;
use crate::pipeline::runner::OutcomeSink;
use crate::pipeline::types::Outcome;

/// Writes one report file per outcome into a fixed output directory.
///
/// Reruns overwrite in place: the derived filename is a pure function of
/// the item's display path, so output identity is stable across runs.
/// Two items that differ only in the stripped suffix segment derive the
/// same filename and the later write clobbers the earlier one; the
/// naming rule is kept as-is and the collision is not detected.
pub struct ReviewSink {
    output_dir: PathBuf,
    target_filename: String,
}

impl ReviewSink {
    pub fn new(output_dir: PathBuf, target_filename: String) -> Self {
        Self {
            output_dir,
            target_filename,
        }
    }

    /// e.g. `bytes/pkg.generated.mbti` -> `bytes.review.md`
    pub fn derive_filename(&self, display: &str) -> String {
        let suffix = format!("/{}", self.target_filename);
        let stripped = display.strip_suffix(&suffix).unwrap_or(display);
        let mut name = stripped.replace(['/', '\\'], "_");
        name.push_str(".review.md");
        name
    }

    fn format_report(&self, outcome: &Outcome) -> String {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let status = if outcome.succeeded() {
            "✓ Success"
        } else {
            "✗ Failed"
        };
        let body = match &outcome.result {
            Ok(review) => format!("---\n\n{review}"),
            Err(error) => format!("**Error:** {error}"),
        };

        format!(
            "# Review: {label}\n\n**File:** `{file}`  \n**Date:** {timestamp}  \n**Status:** {status}\n\n{body}\n",
            label = outcome.label,
            file = outcome.item.display,
        )
    }

    async fn write_report(&self, outcome: &Outcome) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self
            .output_dir
            .join(self.derive_filename(&outcome.item.display));
        tokio::fs::write(&path, self.format_report(outcome)).await?;
        Ok(path)
    }
}

#[async_trait]
impl OutcomeSink for ReviewSink {
    async fn persist(&self, outcome: &Outcome) -> Option<PathBuf> {
        match self.write_report(outcome).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(
                    path = %outcome.item.display,
                    error = %e,
                    "Failed to save review"
                );
                None
            }
        }
    }
}
