use std::path::{Path, PathBuf};

/// One unit of work: a discovered interface file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkItem {
    /// Absolute path used for reading.
    pub path: PathBuf,
    /// Root-relative path used for display and output naming.
    pub display: String,
}

impl WorkItem {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let display = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        Self { path, display }
    }
}

/// Result of processing one work item.
///
/// A review text and a failure reason are mutually exclusive; the
/// `Result` encodes that directly.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub item: WorkItem,
    /// Declared package name, or "unknown" when extraction failed.
    pub label: String,
    pub result: std::result::Result<String, String>,
}

impl Outcome {
    pub fn success(item: WorkItem, label: String, review: String) -> Self {
        Self {
            item,
            label,
            result: Ok(review),
        }
    }

    pub fn failure(item: WorkItem, error: String) -> Self {
        Self {
            item,
            label: "unknown".to_string(),
            result: Err(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn payload(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.result.as_deref().err().map(|x| x.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_display_is_relative() {
        let item = WorkItem::new(
            Path::new("/repo"),
            PathBuf::from("/repo/bytes/pkg.generated.mbti"),
        );
        assert_eq!(item.display, "bytes/pkg.generated.mbti");
        assert_eq!(item.path, PathBuf::from("/repo/bytes/pkg.generated.mbti"));
    }

    #[test]
    fn test_work_item_outside_root_keeps_full_path() {
        let item = WorkItem::new(
            Path::new("/repo"),
            PathBuf::from("/elsewhere/pkg.generated.mbti"),
        );
        assert_eq!(item.display, "/elsewhere/pkg.generated.mbti");
    }

    #[test]
    fn test_outcome_success_accessors() {
        let item = WorkItem::new(Path::new("/r"), PathBuf::from("/r/a/pkg.generated.mbti"));
        let outcome = Outcome::success(item, "bytes".to_string(), "Looks fine.".to_string());
        assert!(outcome.succeeded());
        assert_eq!(outcome.payload(), Some("Looks fine."));
        assert_eq!(outcome.failure_reason(), None);
    }

    #[test]
    fn test_outcome_failure_defaults_label_to_unknown() {
        let item = WorkItem::new(Path::new("/r"), PathBuf::from("/r/a/pkg.generated.mbti"));
        let outcome = Outcome::failure(item, "read error".to_string());
        assert!(!outcome.succeeded());
        assert_eq!(outcome.label, "unknown");
        assert_eq!(outcome.failure_reason(), Some("read error"));
        assert_eq!(outcome.payload(), None);
    }
}
