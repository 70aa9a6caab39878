//! `git filter-repo` mapping files: `--replace-text` and `--paths-from-file`.

use crate::constants::MAPPING_SEPARATOR;
use crate::util::fs::write_atomic;
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// `${KEY}==>VALUE` per provided value.
pub fn vars_lines(values: &BTreeMap<String, String>) -> Vec<String> {
    values
        .iter()
        .map(|(k, v)| format!("${{{}}}{}{}", k, MAPPING_SEPARATOR, v))
        .collect()
}

/// `old==>new` per templated path, substituting every known `${KEY}`.
pub fn paths_lines(paths: &BTreeSet<String>, values: &BTreeMap<String, String>) -> Vec<String> {
    paths
        .iter()
        .map(|old| format!("{}{}{}", old, MAPPING_SEPARATOR, rename(old, values)))
        .collect()
}

/// Substitute `${KEY}` occurrences in a path.
pub fn rename(path: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = path.to_string();
    for (key, value) in values {
        if out.contains(key.as_str()) {
            out = out.replace(&format!("${{{}}}", key), value);
        }
    }
    out
}

pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    write_atomic(path, &content)
}
