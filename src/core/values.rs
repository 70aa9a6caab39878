//! Replacement values loaded from tracked `.env` files.

use crate::constants;
use crate::util::path::find_upwards;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tracked `.env` files usable as value sources, in `git ls-files` order.
pub fn config_files(files: &[String], exclude_marker: &str) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.ends_with(constants::CONFIG_EXTENSION))
        .filter(|f| exclude_marker.is_empty() || !f.contains(exclude_marker))
        .cloned()
        .collect()
}

/// Parse a single dotenv file, keeping key order.
pub fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut entries = Vec::new();
    for item in iter {
        let (key, value) = item.with_context(|| format!("parse {}", path.display()))?;
        entries.push((key, value));
    }
    Ok(entries)
}

/// Merge values from `configs`; later files override earlier ones.
///
/// Relative names are looked up from `repo` upwards, nearest first.
pub fn load_values(repo: &Path, configs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for config in configs {
        let Some(path) = resolve_config(repo, config) else {
            debug!(config = %config, "config file not found, skipping");
            continue;
        };
        for (key, value) in read_dotenv(&path)? {
            values.insert(key, value);
        }
    }
    Ok(values)
}

fn resolve_config(repo: &Path, config: &str) -> Option<PathBuf> {
    find_upwards(repo, Path::new(config))
}

/// Required vs. provided variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VarDiff {
    /// Used by the template but without a value.
    pub missing: BTreeSet<String>,
    /// Provided but never used as a template parameter.
    pub extras: BTreeSet<String>,
}

impl VarDiff {
    pub fn compare(required: &BTreeSet<String>, provided: &BTreeMap<String, String>) -> Self {
        let got: BTreeSet<String> = provided.keys().cloned().collect();
        Self {
            missing: required.difference(&got).cloned().collect(),
            extras: got.difference(required).cloned().collect(),
        }
    }
}
