//! Upload `.env` values as encrypted Actions secrets.

use crate::cli::{tree, CliContext};
use crate::constants;
use crate::core::github::{validate_repo, ActionsClient};
use crate::core::upload::{self, SecretEntry};
use crate::core::values;
use crate::util::path::find_upwards;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::env;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct SecretsArgs {
    /// Dotenv file to upload (default: nearest .env from the current directory up)
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Target repository as OWNER/NAME (default: GITHUB_REPO from the dotenv file or environment)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = constants::DEFAULT_API_URL)]
    pub api_url: String,

    /// List what would be uploaded without contacting the API
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &CliContext, args: SecretsArgs) -> Result<()> {
    let env_path = locate_dotenv(args.env_file.as_deref())?;
    let entries = load_entries(&env_path)?;
    let pat = resolve_token(&entries)?;
    let repo = resolve_repo(args.repo, &entries, env::var(constants::REPO_KEY).ok())?;

    let policy = &ctx.settings.secrets;
    if args.dry_run {
        let plan = upload::plan(&entries, policy)?;
        println!("Would upload to {} from {}", repo, env_path.display());
        println!("{}", tree(&plan.uploaded));
        if !plan.skipped.is_empty() {
            println!("Skipping (reserved prefix)");
            println!("{}", tree(&plan.skipped));
        }
        return Ok(());
    }

    let client = ActionsClient::new(&args.api_url, &repo, pat)?;
    let mut stdout = std::io::stdout();
    let outcome = upload::upload(&client, &entries, policy, &mut stdout)?;

    println!(
        "\nUploaded {} secret(s) to {}, skipped {}",
        outcome.uploaded.len(),
        repo,
        outcome.skipped.len()
    );
    if ctx.verbose && !outcome.skipped.is_empty() {
        println!("{}", tree(&outcome.skipped));
    }
    Ok(())
}

/// Read the dotenv file; a repeated key keeps its first position and last value.
fn load_entries(path: &Path) -> Result<Vec<SecretEntry>> {
    let mut entries: Vec<SecretEntry> = Vec::new();
    for (key, value) in values::read_dotenv(path)? {
        match entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.value = Zeroizing::new(value),
            None => entries.push(SecretEntry::new(key, value)),
        }
    }
    if entries.is_empty() {
        bail!("no dotenv found or is empty: {}", path.display());
    }
    Ok(entries)
}

fn resolve_token(entries: &[SecretEntry]) -> Result<&str> {
    lookup(entries, constants::PAT_KEY)
        .filter(|v| !v.is_empty())
        .context("no personal access token found or is empty (set PAT in the dotenv file)")
}

/// `--repo`, then the dotenv `GITHUB_REPO`, then the process environment.
fn resolve_repo(arg: Option<String>, entries: &[SecretEntry], from_env: Option<String>) -> Result<String> {
    let repo = arg
        .or_else(|| lookup(entries, constants::REPO_KEY).map(str::to_string))
        .or(from_env)
        .filter(|r| !r.is_empty())
        .with_context(|| format!("no repository given (use --repo or set {})", constants::REPO_KEY))?;
    validate_repo(&repo)?;
    Ok(repo)
}

fn locate_dotenv(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("file not found: {}", path.display());
        }
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("resolve current directory")?;
    find_upwards(&cwd, Path::new(constants::DEFAULT_DOTENV))
        .with_context(|| format!("no dotenv found or is empty (searched from {})", cwd.display()))
}

fn lookup<'a>(entries: &'a [SecretEntry], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .rev()
        .find(|e| e.key == key)
        .map(|e| e.value.as_str())
}
