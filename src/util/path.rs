//! Path helpers for locating config files and classifying tracked paths.

use std::path::{Path, PathBuf};

/// Find `name` in `start` or the nearest ancestor that has it.
pub fn find_upwards(start: &Path, name: &Path) -> Option<PathBuf> {
    if name.is_absolute() {
        return name.is_file().then(|| name.to_path_buf());
    }
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Extension of a tracked path including the dot, e.g. `.env`.
///
/// A bare dotfile such as `.env` has no extension.
pub fn dotted_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}
