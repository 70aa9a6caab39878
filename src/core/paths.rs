//! Repository root resolution and derived file locations.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RepoPaths {
    pub root: PathBuf,
    pub settings: PathBuf,
    pub vars_file: PathBuf,
    pub paths_file: PathBuf,
}

impl RepoPaths {
    /// Resolve the repository root from CLI arg, env var, or the nearest `.git`.
    /// The returned root is always absolute.
    pub fn resolve(root_arg: Option<PathBuf>) -> Result<Self> {
        let cwd = env::current_dir().context("resolve current directory")?;
        if let Some(root) = root_arg {
            return Ok(Self::from_root(absolute(&cwd, root)));
        }
        if let Ok(root) = env::var("TEMPLATE_KIT_REPO") {
            return Ok(Self::from_root(absolute(&cwd, PathBuf::from(root))));
        }
        let root = find_repo_root(&cwd).unwrap_or(cwd);
        Ok(Self::from_root(root))
    }

    pub fn from_root(root: PathBuf) -> Self {
        let settings = root.join(constants::SETTINGS_FILE);
        let vars_file = root.join(constants::DEFAULT_VARS_FILE);
        let paths_file = root.join(constants::DEFAULT_PATHS_FILE);
        Self {
            root,
            settings,
            vars_file,
            paths_file,
        }
    }

    /// Resolve a user-supplied path against the repository root.
    pub fn in_repo(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn absolute(cwd: &Path, root: PathBuf) -> PathBuf {
    let joined = if root.is_absolute() { root } else { cwd.join(root) };
    normalize(&joined)
}

/// Drop `.` and resolve `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

impl std::fmt::Display for RepoPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "repo@{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_root() {
        let paths = RepoPaths::from_root(PathBuf::from("/test"));
        assert_eq!(paths.root, PathBuf::from("/test"));
        assert_eq!(paths.settings, PathBuf::from("/test/template-kit.toml"));
        assert_eq!(paths.vars_file, PathBuf::from("/test/scripts/.vars.txt"));
        assert_eq!(paths.paths_file, PathBuf::from("/test/scripts/.paths.txt"));
    }

    #[test]
    fn test_in_repo() {
        let paths = RepoPaths::from_root(PathBuf::from("/test"));
        assert_eq!(paths.in_repo(Path::new("out/v.txt")), PathBuf::from("/test/out/v.txt"));
        assert_eq!(paths.in_repo(Path::new("/tmp/v.txt")), PathBuf::from("/tmp/v.txt"));
    }

    #[test]
    fn test_resolve_relative_root_is_absolute() {
        let cwd = env::current_dir().unwrap();
        let paths = RepoPaths::resolve(Some(PathBuf::from("target/../target/tk_repo"))).unwrap();
        assert_eq!(paths.root, cwd.join("target/tk_repo"));
        assert!(paths.vars_file.is_absolute());
        assert!(paths.paths_file.is_absolute());
        assert!(paths.in_repo(Path::new("out/v.txt")).is_absolute());
    }

    #[test]
    fn test_absolute_keeps_absolute_root() {
        let cwd = PathBuf::from("/work");
        assert_eq!(absolute(&cwd, PathBuf::from("/repo/./x")), PathBuf::from("/repo/x"));
        assert_eq!(absolute(&cwd, PathBuf::from("../proj")), PathBuf::from("/proj"));
    }

    #[test]
    fn test_find_repo_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("src/bin");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_repo_root(&nested), Some(dir.path().to_path_buf()));
    }
}
