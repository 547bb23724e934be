use std::ffi::OsStr;
use std::path::Path;

use walkdir::WalkDir;

use crate::pipeline::types::WorkItem;

/// Recursively collect every file named `target` under `root`.
///
/// Hidden directories and the configured excluded names are pruned at
/// any depth. Unreadable entries degrade the result set instead of
/// aborting the walk: permission failures are expected (vendored trees,
/// other users' files) and logged at debug, anything else at warn.
pub fn find_target_files(root: &Path, target: &str, excluded: &[String]) -> Vec<WorkItem> {
    let mut items = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.file_name(), excluded));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if is_permission_error(&e) {
                    tracing::debug!(error = %e, "Skipping unreadable directory");
                } else {
                    tracing::warn!(error = %e, "Error reading directory entry");
                }
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name() == OsStr::new(target) {
            items.push(WorkItem::new(root, entry.into_path()));
        }
    }

    items
}

fn is_excluded(name: &OsStr, excluded: &[String]) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || excluded.iter().any(|ex| name == ex.as_str())
}

fn is_permission_error(e: &walkdir::Error) -> bool {
    e.io_error()
        .map(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
        .unwrap_or(false)
}
