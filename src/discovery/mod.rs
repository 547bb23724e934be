pub mod changed;
pub mod walk;

use std::path::Path;

use crate::config::DiscoveryConfig;
use crate::error::{AppError, Result};
use crate::pipeline::types::WorkItem;

/// How the work-item list is produced.
#[derive(Debug, Clone)]
pub enum Source {
    /// Full recursive scan for the target filename.
    All,
    /// Files changed in git relative to HEAD.
    Changed,
    /// Explicit root-relative paths, taken as given.
    Explicit(Vec<String>),
}

/// Produce the sorted work-item list for a run.
///
/// A failed git query degrades to an empty list rather than aborting;
/// explicit paths are not validated here, a missing file surfaces later
/// as a failed outcome.
pub async fn discover(root: &Path, source: &Source, config: &DiscoveryConfig) -> Result<Vec<WorkItem>> {
    let mut items = match source {
        Source::All => {
            let root = root.to_path_buf();
            let target = config.target_filename.clone();
            let excluded = config.excluded_dirs.clone();
            tokio::task::spawn_blocking(move || walk::find_target_files(&root, &target, &excluded))
                .await
                .map_err(|e| AppError::Discovery(format!("Walk task panicked: {e}")))?
        }
        Source::Changed => match changed::changed_files(root, &config.target_filename).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to query changed files");
                Vec::new()
            }
        },
        Source::Explicit(paths) => paths
            .iter()
            .map(|p| WorkItem::new(root, root.join(p)))
            .collect(),
    };

    items.sort();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    #[tokio::test]
    async fn test_all_is_sorted_lexicographically() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for dir in ["zeta", "alpha", "mid"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("pkg.generated.mbti"), "package \"x\"\n").unwrap();
        }

        let items = discover(root, &Source::All, &config()).await.unwrap();
        let displays: Vec<&str> = items.iter().map(|i| i.display.as_str()).collect();
        assert_eq!(
            displays,
            vec![
                "alpha/pkg.generated.mbti",
                "mid/pkg.generated.mbti",
                "zeta/pkg.generated.mbti"
            ]
        );
    }

    #[tokio::test]
    async fn test_changed_degrades_to_empty_outside_a_repository() {
        let tmp = tempfile::tempdir().unwrap();
        let items = discover(tmp.path(), &Source::Changed, &config()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_joins_without_validation() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = vec!["missing/pkg.generated.mbti".to_string()];
        let items = discover(tmp.path(), &Source::Explicit(paths), &config())
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display, "missing/pkg.generated.mbti");
        assert!(!items[0].path.exists());
    }
}
