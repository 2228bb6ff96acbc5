//! Candidate file discovery.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found under a scan root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Regular files that passed the filter, in walk order
    pub files: Vec<PathBuf>,
    /// The root did not exist
    pub root_missing: bool,
}

/// List regular files under `root` that pass `filter`.
///
/// Without `recursive` only direct children are returned. With it the whole
/// subtree is walked, following directory symlinks; symlink loops and
/// unreadable entries are logged and skipped. Entries are sorted by file
/// name within each directory.
pub fn list_files<F>(root: &Path, recursive: bool, filter: F) -> WalkOutcome
where
    F: Fn(&Path) -> bool,
{
    if !root.exists() {
        warn!(root = %root.display(), "scan root does not exist");
        return WalkOutcome {
            files: Vec::new(),
            root_missing: true,
        };
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    warn!(
                        path = ?e.path(),
                        ancestor = %ancestor.display(),
                        "skipping symlink loop"
                    );
                } else {
                    warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if filter(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "skipping unsupported file");
        }
    }

    debug!(root = %root.display(), recursive, count = files.len(), "listed candidate files");

    WalkOutcome {
        files,
        root_missing: false,
    }
}
