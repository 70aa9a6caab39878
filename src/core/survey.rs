//! Shared scan + value loading used by `info` and `replace`.

use crate::core::paths::RepoPaths;
use crate::core::scanner::{self, ScanOptions, TemplatePattern};
use crate::core::values::{self, VarDiff};
use crate::models::scan::ScanReport;
use crate::models::settings::ScanSection;
use crate::util::git;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Everything known about a template checkout.
#[derive(Debug, Clone)]
pub struct Survey {
    pub report: ScanReport,
    pub config_files: Vec<String>,
    pub values: BTreeMap<String, String>,
    pub diff: VarDiff,
}

/// Survey the tracked files of the repository at `paths.root`.
pub fn survey(paths: &RepoPaths, scan: &ScanSection) -> Result<Survey> {
    let files = git::ls_files(&paths.root)?;
    debug!(count = files.len(), "tracked files");
    survey_files(&paths.root, &files, scan, ScanOptions::default())
}

/// Survey an explicit file list (relative to `root`).
pub fn survey_files(
    root: &Path,
    files: &[String],
    scan: &ScanSection,
    mut opts: ScanOptions,
) -> Result<Survey> {
    let pattern = TemplatePattern::new(scan.prefixes.as_slice())?;
    opts.skip_extensions = scan.skip_extensions.clone();
    let report = scanner::scan(root, files, &pattern, &opts)?;

    let config_files = values::config_files(files, &scan.config_exclude);
    let values = values::load_values(root, &config_files)?;
    let diff = VarDiff::compare(&report.required(), &values);
    Ok(Survey {
        report,
        config_files,
        values,
        diff,
    })
}
