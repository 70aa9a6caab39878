//! Wrappers around the `git` and `git filter-repo` executables.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// List tracked files relative to `repo`, as `git ls-files` reports them.
pub fn ls_files(repo: &Path) -> Result<Vec<String>> {
    let mut cmd = Command::new("git");
    cmd.arg("ls-files").arg("-z").current_dir(repo);
    let stdout = run(cmd).context("git ls-files")?;
    Ok(stdout
        .split('\0')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect())
}

/// Whether `git filter-repo` is installed.
pub fn filter_repo_available() -> bool {
    Command::new("git")
        .args(["filter-repo", "--version"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Arguments passed to `git` for a history rewrite.
pub fn filter_repo_args(vars_file: &Path, paths_file: &Path, dry_run: bool) -> Vec<String> {
    let mut args = vec![
        "filter-repo".to_string(),
        "--replace-text".to_string(),
        vars_file.display().to_string(),
        "--paths-from-file".to_string(),
        paths_file.display().to_string(),
        "--force".to_string(),
    ];
    if dry_run {
        args.push("--dry-run".to_string());
    }
    args
}

/// Rewrite history with the given mapping files. Returns the tool's stdout.
pub fn filter_repo(repo: &Path, vars_file: &Path, paths_file: &Path, dry_run: bool) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(filter_repo_args(vars_file, paths_file, dry_run))
        .current_dir(repo);
    run(cmd).context("git filter-repo")
}

fn run(mut cmd: Command) -> Result<String> {
    debug!(command = ?cmd, "spawning");
    let output = cmd.output().context("run command")?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        if !stderr.trim().is_empty() {
            warn!("{}", stderr.trim());
        }
        return Ok(stdout);
    }
    bail!("command failed: {}{}", stdout, stderr);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    #[test]
    fn test_filter_repo_args() {
        let args = filter_repo_args(Path::new("v.txt"), Path::new("p.txt"), false);
        assert_eq!(
            args,
            vec![
                "filter-repo",
                "--replace-text",
                "v.txt",
                "--paths-from-file",
                "p.txt",
                "--force"
            ]
        );
    }

    #[test]
    fn test_filter_repo_args_dry_run() {
        let args = filter_repo_args(Path::new("v.txt"), Path::new("p.txt"), true);
        assert_eq!(args.last().map(String::as_str), Some("--dry-run"));
    }

    #[test]
    fn test_ls_files_lists_tracked_only() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(status.success());
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/${PROJECT_NAME}.txt"), "x").unwrap();
        fs::write(dir.path().join("untracked.txt"), "x").unwrap();
        let status = Command::new("git")
            .args(["add", "src"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(status.success());

        let files = ls_files(dir.path()).unwrap();
        assert_eq!(files, vec!["src/${PROJECT_NAME}.txt"]);
    }

    #[test]
    fn test_ls_files_outside_repo_fails() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        // GIT_CEILING_DIRECTORIES keeps git from discovering an enclosing repo.
        let mut cmd = Command::new("git");
        cmd.arg("ls-files")
            .current_dir(dir.path())
            .env("GIT_CEILING_DIRECTORIES", dir.path().parent().unwrap());
        assert!(run(cmd).is_err());
    }
}
