//! Replace placeholders across the whole history via `git filter-repo`.

use crate::cli::{tree, CliContext};
use crate::core::mapping;
use crate::core::paths::RepoPaths;
use crate::core::survey::{self, Survey};
use crate::util::git;
use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::Confirm;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Pass --dry-run to git filter-repo (history is left untouched)
    #[arg(long)]
    pub dry_run: bool,

    /// Where to write the --replace-text mapping (default: scripts/.vars.txt)
    #[arg(long, value_name = "PATH")]
    pub vars_file: Option<PathBuf>,

    /// Where to write the --paths-from-file mapping (default: scripts/.paths.txt)
    #[arg(long, value_name = "PATH")]
    pub paths_file: Option<PathBuf>,
}

pub fn run(ctx: &CliContext, args: ReplaceArgs) -> Result<()> {
    let paths = &ctx.paths;
    if !git::filter_repo_available() {
        bail!("git filter-repo not found on PATH (install with: python -m pip install git-filter-repo)");
    }

    let s = survey::survey(paths, &ctx.settings.scan)?;
    println!("\nUsing config files");
    println!("{}\n", tree(&s.config_files));

    if !s.diff.missing.is_empty() {
        println!("Required but missing:");
        println!("{}", tree(&s.diff.missing));
    }
    let Mappings {
        vars_file,
        paths_file,
        vars_lines,
        path_lines,
    } = write_mappings(paths, &s, args.vars_file, args.paths_file)?;

    if ctx.verbose {
        for line in vars_lines.iter().chain(path_lines.iter()) {
            println!("{}", line);
        }
    }
    info!(vars = %vars_file.display(), paths = %paths_file.display(), "wrote mapping files");

    if !confirm(ctx, "Sure you want to replace?")? {
        println!("Aborted; mapping files kept at {} and {}", vars_file.display(), paths_file.display());
        return Ok(());
    }

    if ctx.verbose {
        println!("Running command:");
        println!("git {}", git::filter_repo_args(&vars_file, &paths_file, args.dry_run).join(" "));
    }
    let stdout = git::filter_repo(&paths.root, &vars_file, &paths_file, args.dry_run)?;
    if ctx.verbose {
        print!("{}", stdout);
    }

    if args.dry_run {
        println!("Dry run complete; history unchanged");
    } else {
        println!(
            "Replaced {} variable(s) and renamed {} path(s)",
            s.values.len(),
            s.report.paths.len()
        );
    }
    Ok(())
}

/// Mapping files written for `git filter-repo`, with their contents.
#[derive(Debug)]
pub struct Mappings {
    pub vars_file: PathBuf,
    pub paths_file: PathBuf,
    pub vars_lines: Vec<String>,
    pub path_lines: Vec<String>,
}

/// Write both mapping files. Refuses, writing nothing, while values are missing.
pub fn write_mappings(
    paths: &RepoPaths,
    s: &Survey,
    vars_file: Option<PathBuf>,
    paths_file: Option<PathBuf>,
) -> Result<Mappings> {
    if !s.diff.missing.is_empty() {
        bail!("not replacing as some are missing and this might make your project unusable");
    }

    let vars_file = vars_file
        .map(|p| paths.in_repo(&p))
        .unwrap_or_else(|| paths.vars_file.clone());
    let paths_file = paths_file
        .map(|p| paths.in_repo(&p))
        .unwrap_or_else(|| paths.paths_file.clone());

    let vars_lines = mapping::vars_lines(&s.values);
    mapping::write_lines(&vars_file, &vars_lines)?;
    let path_lines = mapping::paths_lines(&s.report.paths, &s.values);
    mapping::write_lines(&paths_file, &path_lines)?;

    Ok(Mappings {
        vars_file,
        paths_file,
        vars_lines,
        path_lines,
    })
}

fn confirm(ctx: &CliContext, prompt: &str) -> Result<bool> {
    if ctx.non_interactive {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("read confirmation")
}
