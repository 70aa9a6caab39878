//! Per-repository settings (`template-kit.toml`).

use crate::constants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub secrets: SecretsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSection {
    /// Placeholder prefixes, e.g. `PROJECT` for `${PROJECT_NAME}`.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,

    /// Extensions whose contents are not scanned.
    #[serde(default = "default_skip_extensions")]
    pub skip_extensions: Vec<String>,

    /// `.env` files whose path contains this marker are not value sources.
    #[serde(default = "default_config_exclude")]
    pub config_exclude: String,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            prefixes: default_prefixes(),
            skip_extensions: default_skip_extensions(),
            config_exclude: default_config_exclude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsSection {
    /// Keys with any of these prefixes are never uploaded.
    #[serde(default = "default_secret_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

impl Default for SecretsSection {
    fn default() -> Self {
        Self {
            skip_prefixes: default_secret_skip_prefixes(),
        }
    }
}

impl SecretsSection {
    pub fn is_skipped(&self, key: &str) -> bool {
        self.skip_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

fn default_prefixes() -> Vec<String> {
    to_owned(constants::DEFAULT_PREFIXES)
}

fn default_skip_extensions() -> Vec<String> {
    to_owned(constants::DEFAULT_SKIP_EXTENSIONS)
}

fn default_config_exclude() -> String {
    constants::DEFAULT_CONFIG_EXCLUDE.to_string()
}

fn default_secret_skip_prefixes() -> Vec<String> {
    to_owned(constants::DEFAULT_SECRET_SKIP_PREFIXES)
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.scan.prefixes, vec!["PROJECT", "GITHUB"]);
        assert_eq!(settings.scan.skip_extensions, vec![".env"]);
        assert_eq!(settings.scan.config_exclude, "secret");
        assert_eq!(settings.secrets.skip_prefixes, vec!["GITHUB_"]);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[scan]\nprefixes = [\"APP\"]\n").unwrap();
        assert_eq!(settings.scan.prefixes, vec!["APP"]);
        assert_eq!(settings.scan.skip_extensions, vec![".env"]);
    }

    #[test]
    fn test_secret_skip_prefix() {
        let secrets = SecretsSection::default();
        assert!(secrets.is_skipped("GITHUB_REPO"));
        assert!(!secrets.is_skipped("PAT"));
        assert!(!secrets.is_skipped("MY_GITHUB_TOKEN"));
    }
}
