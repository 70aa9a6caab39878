//! Centralized constants for scanning, mapping files, and the secrets API.

/// Placeholder prefixes recognised by default, one capture group each.
pub const DEFAULT_PREFIXES: &[&str] = &["PROJECT", "GITHUB"];

/// Files with these extensions are never opened; only their names are scanned.
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[".env"];

/// Extension identifying replacement value files.
pub const CONFIG_EXTENSION: &str = ".env";

/// Config files whose path contains this marker are never used as values.
pub const DEFAULT_CONFIG_EXCLUDE: &str = "secret";

/// Optional per-repository settings file.
pub const SETTINGS_FILE: &str = "template-kit.toml";

/// Default `--replace-text` mapping file, relative to the repo root.
pub const DEFAULT_VARS_FILE: &str = "scripts/.vars.txt";

/// Default `--paths-from-file` mapping file, relative to the repo root.
pub const DEFAULT_PATHS_FILE: &str = "scripts/.paths.txt";

/// Separator used by `git filter-repo` mapping files.
pub const MAPPING_SEPARATOR: &str = "==>";

/// Number of leading bytes inspected when deciding whether a file is binary.
pub const BINARY_SNIFF_LEN: usize = 8000;

/// Default dotenv file searched for by the secrets uploader.
pub const DEFAULT_DOTENV: &str = ".env";

/// Key holding the personal access token in the dotenv file.
pub const PAT_KEY: &str = "PAT";

/// Key holding the `owner/name` repository slug.
pub const REPO_KEY: &str = "GITHUB_REPO";

/// Secret name prefixes the hosting service refuses.
pub const DEFAULT_SECRET_SKIP_PREFIXES: &[&str] = &["GITHUB_"];

/// Default REST API base.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested from the REST API.
pub const API_ACCEPT: &str = "application/vnd.github.v3+json";

/// Length of an X25519 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;
