//! Project template maintenance CLI.
//!
//! Detects `${PROJECT_*}` / `${GITHUB_*}` placeholders in a git checkout,
//! rewrites history with user-supplied values via `git filter-repo`, and
//! uploads `.env` values as encrypted Actions secrets.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Scanning, value loading, mapping files, secrets API
//! - `models` — Data structures
//! - `util` — Filesystem, git, and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
