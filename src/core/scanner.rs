//! Placeholder detection over tracked file names and contents.

use crate::constants;
use crate::models::scan::ScanReport;
use crate::util::path::dotted_extension;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Compiled placeholder pattern, one capture group per prefix.
#[derive(Debug, Clone)]
pub struct TemplatePattern {
    regex: Regex,
}

impl TemplatePattern {
    /// `${PREFIX_...}` or `${PREFIX-...}` for each prefix, whitespace allowed inside braces.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self> {
        if prefixes.is_empty() {
            bail!("at least one placeholder prefix is required");
        }
        let alternatives: Vec<String> = prefixes
            .iter()
            .map(|p| {
                format!(
                    r"(\$\{{\s*{}[_\-][0-9a-zA-Z_\-]*\s*\}})",
                    regex::escape(p.as_ref())
                )
            })
            .collect();
        let regex = Regex::new(&alternatives.join("|")).context("compile placeholder pattern")?;
        Ok(Self { regex })
    }

    /// Every match in `text` as (capture group, matched text).
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        let mut out = Vec::new();
        for caps in self.regex.captures_iter(text) {
            for (idx, group) in caps.iter().enumerate().skip(1) {
                if let Some(m) = group {
                    out.push((idx, m.as_str()));
                }
            }
        }
        out
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extensions whose contents are not read (names are still scanned).
    pub skip_extensions: Vec<String>,
    /// File never scanned, normally the running executable.
    pub exclude: Option<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_extensions: constants::DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: std::env::current_exe().ok(),
        }
    }
}

/// Scan `files` (relative to `repo`) for placeholders in names and text contents.
pub fn scan(repo: &Path, files: &[String], pattern: &TemplatePattern, opts: &ScanOptions) -> Result<ScanReport> {
    let exclude = opts.exclude.as_ref().and_then(|p| fs::canonicalize(p).ok());
    let mut report = ScanReport::default();

    for file in files {
        let full = repo.join(file);
        if let Some(ref ex) = exclude {
            if fs::canonicalize(&full).ok().as_ref() == Some(ex) {
                continue;
            }
        }

        if pattern.is_match(file) {
            report.paths.insert(file.clone());
            for (group, text) in pattern.find_all(file) {
                report.record(group, text, file);
            }
        }

        if let Some(ext) = dotted_extension(file) {
            if opts.skip_extensions.iter().any(|s| *s == ext) {
                continue;
            }
        }

        let Some(content) = read_text(&full)? else {
            debug!(file = %file, "skipping contents (missing or binary)");
            continue;
        };
        for line in content.lines() {
            for (group, text) in pattern.find_all(line) {
                report.record(group, text, file);
            }
        }
    }

    Ok(report)
}

/// Read a file as UTF-8 text. `None` for missing, non-regular, or binary files.
fn read_text(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let mut bytes = Vec::new();
    fs::File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .with_context(|| format!("read {}", path.display()))?;
    let head = &bytes[..bytes.len().min(constants::BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return Ok(None);
    }
    Ok(String::from_utf8(bytes).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opts() -> ScanOptions {
        ScanOptions {
            exclude: None,
            ..ScanOptions::default()
        }
    }

    fn default_pattern() -> TemplatePattern {
        TemplatePattern::new(constants::DEFAULT_PREFIXES).unwrap()
    }

    fn files(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pattern_groups() {
        let p = default_pattern();
        let found = p.find_all("name: ${PROJECT_NAME} by ${ GITHUB_USER } ${OTHER_X}");
        assert_eq!(found, vec![(1, "${PROJECT_NAME}"), (2, "${ GITHUB_USER }")]);
    }

    #[test]
    fn test_pattern_accepts_dash_separator() {
        let p = default_pattern();
        assert!(p.is_match("${PROJECT-slug}"));
        assert!(!p.is_match("${PROJECTNAME}"));
        assert!(!p.is_match("$PROJECT_NAME"));
    }

    #[test]
    fn test_pattern_custom_prefix() {
        let p = TemplatePattern::new(&["APP"]).unwrap();
        assert_eq!(p.find_all("${APP_ID} ${PROJECT_NAME}"), vec![(1, "${APP_ID}")]);
    }

    #[test]
    fn test_pattern_rejects_empty_prefixes() {
        let empty: [&str; 0] = [];
        assert!(TemplatePattern::new(&empty).is_err());
    }

    #[test]
    fn test_scan_names_and_contents() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("${PROJECT_NAME}")).unwrap();
        fs::write(dir.path().join("${PROJECT_NAME}/main.txt"), "plain").unwrap();
        fs::write(dir.path().join("README.md"), "# ${PROJECT_TITLE}\nby ${GITHUB_USER}\n").unwrap();

        let list = files(&["${PROJECT_NAME}/main.txt", "README.md"]);
        let report = scan(dir.path(), &list, &default_pattern(), &opts()).unwrap();

        assert_eq!(report.paths.iter().collect::<Vec<_>>(), vec!["${PROJECT_NAME}/main.txt"]);
        let required: Vec<_> = report.required().into_iter().collect();
        assert_eq!(required, vec!["GITHUB_USER", "PROJECT_NAME", "PROJECT_TITLE"]);
        assert!(report.matches[&2]["${GITHUB_USER}"].contains("README.md"));
    }

    #[test]
    fn test_scan_skips_env_contents_but_not_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("${PROJECT_NAME}.env"), "X=${PROJECT_HIDDEN}\n").unwrap();
        let list = files(&["${PROJECT_NAME}.env"]);
        let report = scan(dir.path(), &list, &default_pattern(), &opts()).unwrap();
        assert!(report.required().contains("PROJECT_NAME"));
        assert!(!report.required().contains("PROJECT_HIDDEN"));
    }

    #[test]
    fn test_scan_skips_binary_and_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("logo.png"), b"\x89PNG\0${PROJECT_NAME}").unwrap();
        let list = files(&["logo.png", "deleted.txt"]);
        let report = scan(dir.path(), &list, &default_pattern(), &opts()).unwrap();
        assert!(report.vars.is_empty());
    }

    #[test]
    fn test_scan_skips_excluded_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool.sh"), "${PROJECT_NAME}").unwrap();
        let options = ScanOptions {
            exclude: Some(dir.path().join("tool.sh")),
            ..opts()
        };
        let report = scan(dir.path(), &files(&["tool.sh"]), &default_pattern(), &options).unwrap();
        assert!(report.vars.is_empty());
    }
}
