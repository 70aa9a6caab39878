//! Result of scanning tracked files for template placeholders.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Placeholder occurrences found in a set of tracked files.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ScanReport {
    /// Capture group (1-based, one per prefix) -> placeholder -> files containing it.
    pub matches: BTreeMap<usize, BTreeMap<String, BTreeSet<String>>>,
    /// Tracked paths whose name contains a placeholder.
    pub paths: BTreeSet<String>,
    /// Raw placeholders as written, e.g. `${ PROJECT_NAME }`.
    pub vars: BTreeSet<String>,
}

impl ScanReport {
    pub fn record(&mut self, group: usize, placeholder: &str, file: &str) {
        self.vars.insert(placeholder.to_string());
        self.matches
            .entry(group)
            .or_default()
            .entry(placeholder.to_string())
            .or_default()
            .insert(file.to_string());
    }

    /// Variable names the project needs values for.
    pub fn required(&self) -> BTreeSet<String> {
        self.vars.iter().map(|v| strip_placeholder(v)).collect()
    }

    /// Files referencing a variable, keyed by its stripped name.
    pub fn files_by_var(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for by_placeholder in self.matches.values() {
            for (placeholder, files) in by_placeholder {
                out.entry(strip_placeholder(placeholder))
                    .or_default()
                    .extend(files.iter().cloned());
            }
        }
        out
    }
}

/// `${ NAME }` -> `NAME`
pub fn strip_placeholder(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '$' | '{' | '}'))
        .collect::<String>()
        .trim()
        .to_string()
}
