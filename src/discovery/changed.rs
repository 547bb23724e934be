use std::ffi::OsStr;
use std::path::Path;

use git2::Repository;

use crate::error::{AppError, Result};
use crate::pipeline::types::WorkItem;

/// List files named `target` that differ between HEAD and the working
/// tree (staged or not), the in-process equivalent of
/// `git diff --name-only HEAD`.
///
/// Untracked files are not reported, matching the git command.
pub async fn changed_files(root: &Path, target: &str) -> Result<Vec<WorkItem>> {
    let root = root.to_path_buf();
    let target = target.to_string();

    tokio::task::spawn_blocking(move || -> Result<Vec<WorkItem>> {
        let repo = Repository::discover(&root)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| AppError::Git("Repository has no working directory".to_string()))?
            .to_path_buf();

        let head_tree = repo.head()?.peel_to_tree()?;
        let diff = repo.diff_tree_to_workdir_with_index(Some(&head_tree), None)?;

        let mut items = Vec::new();
        for delta in diff.deltas() {
            if let Some(rel) = delta.new_file().path() {
                if rel.file_name() == Some(OsStr::new(target.as_str())) {
                    items.push(WorkItem::new(&root, workdir.join(rel)));
                }
            }
        }
        Ok(items)
    })
    .await
    .map_err(|e| AppError::Git(format!("Changed-files task panicked: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{IndexAddOption, Signature};
    use std::fs;

    const TARGET: &str = "pkg.generated.mbti";

    fn commit_all(repo: &Repository, message: &str) {
        let sig = Signature::now("test", "test@example.com").unwrap();
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_oid = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_oid).unwrap();
        match repo.head() {
            Ok(head) => {
                let parent = head.peel_to_commit().unwrap();
                repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
                    .unwrap();
            }
            Err(_) => {
                repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
                    .unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_reports_modified_target_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let repo = Repository::init(root).unwrap();

        fs::create_dir_all(root.join("bytes")).unwrap();
        fs::write(root.join("bytes").join(TARGET), "package \"demo/bytes\"\n").unwrap();
        fs::write(root.join("bytes/other.txt"), "untouched\n").unwrap();
        commit_all(&repo, "initial");

        fs::write(
            root.join("bytes").join(TARGET),
            "package \"demo/bytes\"\n\nfn len() -> Int\n",
        )
        .unwrap();
        fs::write(root.join("bytes/other.txt"), "also changed\n").unwrap();

        let items = changed_files(root, TARGET).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].display.ends_with(TARGET));
    }

    #[tokio::test]
    async fn test_clean_tree_reports_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let repo = Repository::init(root).unwrap();

        fs::write(root.join(TARGET), "package \"demo/root\"\n").unwrap();
        commit_all(&repo, "initial");

        let items = changed_files(root, TARGET).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_non_repository_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(changed_files(tmp.path(), TARGET).await.is_err());
    }
}
