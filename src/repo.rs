//! Repository root detection.
//!
//! The repository boundary is the nearest ancestor holding a `.git` entry.
//! Worktrees and submodules use a `.git` file instead of a directory, so both count.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Name of the entry marking the top of the source tree.
pub const REPO_MARKER: &str = ".git";

/// Find the nearest ancestor of `start` (inclusive) that contains [`REPO_MARKER`].
///
/// `start` is normalized first, so `sub/..` reports the same root as its parent.
/// Returns `None` when no directory up to the file-system root qualifies.
#[must_use]
pub fn find_repo_root(start: impl AsRef<Path>) -> Option<PathBuf> {
    normalize_path(start.as_ref())
        .ancestors()
        .find(|dir| has_marker(dir))
        .map(Path::to_path_buf)
}

/// Make `path` absolute and fold away `.` and `..` components.
///
/// Works on the text of the path only; symlinks are not resolved and the
/// path need not exist. `..` at the root stays at the root.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn has_marker(dir: &Path) -> bool {
    let marker = dir.join(REPO_MARKER);
    marker.is_dir() || marker.is_file()
}

/// Directory the running test binary lives in.
///
/// Falls back to the current directory when the executable path is unavailable.
#[must_use]
pub fn base_directory() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
