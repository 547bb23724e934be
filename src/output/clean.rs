use std::path::Path;

use crate::error::Result;

const FAILED_MARKER: &str = "**Status:** ✗ Failed";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub removed: usize,
    pub remaining: usize,
}

/// Remove review reports recorded as failed so a rerun regenerates them.
///
/// A missing output directory is treated as already clean.
pub async fn clean_failed_reviews(output_dir: &Path) -> Result<CleanStats> {
    let mut dir = match tokio::fs::read_dir(output_dir).await {
        Ok(dir) => dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CleanStats::default()),
        Err(e) => return Err(e.into()),
    };

    let mut removed = 0;
    let mut total = 0;

    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        let is_review = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".review.md"))
            .unwrap_or(false);
        if !is_review {
            continue;
        }

        total += 1;
        let content = tokio::fs::read_to_string(&path).await?;
        if content.contains(FAILED_MARKER) {
            tracing::info!(file = %path.display(), "Removing failed review");
            tokio::fs::remove_file(&path).await?;
            removed += 1;
        }
    }

    Ok(CleanStats {
        removed,
        remaining: total - removed,
    })
}
