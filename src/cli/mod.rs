//! CLI routing and command dispatch.

use crate::core::paths::RepoPaths;
use crate::core::settings;
use crate::models::settings::Settings;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod info;
pub mod replace;
pub mod secrets;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: RepoPaths,
    pub verbose: bool,
    pub non_interactive: bool,
    pub settings: Settings,
}

#[derive(Parser, Debug)]
#[command(name = "template-kit", version, about = "Fill in project template placeholders and upload repository secrets")]
pub struct Cli {
    /// Repository root (default: nearest ancestor containing .git)
    #[arg(short = 'C', long = "repo-dir", global = true, value_name = "PATH")]
    pub repo_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts (suitable for automation)
    #[arg(long, visible_alias = "yes", global = true, env = "TEMPLATE_KIT_NON_INTERACTIVE")]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = RepoPaths::resolve(self.repo_dir)?;

        // Settings are optional; a broken file falls back to defaults with a warning.
        let settings = match settings::load(&paths.settings) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: ignoring {}: {:#}", paths.settings.display(), e);
                Settings::default()
            }
        };

        let ctx = CliContext {
            paths,
            verbose: self.verbose,
            non_interactive: self.non_interactive,
            settings,
        };

        match self.command {
            Commands::Info(args) => info::run(&ctx, args),
            Commands::Replace(args) => replace::run(&ctx, args),
            Commands::Secrets(args) => secrets::run(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report template placeholders that need to be filled in
    #[command(visible_alias = "i")]
    Info(info::InfoArgs),
    /// Replace placeholders across the whole history with provided values
    #[command(visible_alias = "r")]
    Replace(replace::ReplaceArgs),
    /// Upload .env values as encrypted Actions secrets
    Secrets(secrets::SecretsArgs),
}

/// Render items as an indented tree, one `|__` branch per item.
pub fn tree<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = items
        .into_iter()
        .map(|s| format!("\t|__ {}", s.as_ref()))
        .collect();
    if lines.is_empty() {
        "\t|__ (none)".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["template-kit", "replace", "-v", "--yes", "--dry-run"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.non_interactive);
        assert!(matches!(cli.command, Commands::Replace(ref a) if a.dry_run));
    }

    #[test]
    fn test_tree() {
        assert_eq!(tree(["a.env", "b.env"]), "\t|__ a.env\n\t|__ b.env");
        assert_eq!(tree(Vec::<String>::new()), "\t|__ (none)");
    }
}
