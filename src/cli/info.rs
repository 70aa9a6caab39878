//! Project report: which placeholders exist and which values are missing.

use crate::cli::{tree, CliContext};
use crate::core::survey::{self, Survey};
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output format: text|json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    config_files: &'a [String],
    required: BTreeSet<String>,
    missing: &'a BTreeSet<String>,
    extras: &'a BTreeSet<String>,
    paths: &'a BTreeSet<String>,
}

pub fn run(ctx: &CliContext, args: InfoArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        bail!("invalid format: {} (use text|json)", args.format);
    }

    let s = survey::survey(&ctx.paths, &ctx.settings.scan)?;

    if args.format == "json" {
        let report = InfoReport {
            config_files: &s.config_files,
            required: s.report.required(),
            missing: &s.diff.missing,
            extras: &s.diff.extras,
            paths: &s.report.paths,
        };
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    if ctx.verbose {
        let json = serde_json::to_string_pretty(&s.report).context("serialize scan report")?;
        println!("{}", json);
    }

    println!("\nUsing config files");
    println!("{}\n", tree(&s.config_files));

    if ctx.verbose {
        let json = serde_json::to_string_pretty(&s.values).context("serialize values")?;
        println!("{}", json);
    }

    if s.diff.missing.is_empty() {
        println!("No missing vars");
    } else {
        println!("Required but missing:");
        println!("{}", tree(&s.diff.missing));
    }
    println!();
    if s.diff.extras.is_empty() {
        println!("No extra vars");
    } else {
        println!("Extras found (not using as template params)");
        println!("{}", tree(&s.diff.extras));
    }

    if !s.report.vars.is_empty() {
        println!();
        println!("{}", render_table(&s));
    }
    Ok(())
}

fn render_table(s: &Survey) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Files").add_attribute(Attribute::Bold),
    ]);

    for (var, files) in s.report.files_by_var() {
        let status = if s.values.contains_key(&var) {
            Cell::new("provided").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        let files: Vec<String> = files.into_iter().collect();
        table.add_row(vec![Cell::new(&var), status, Cell::new(files.join("\n"))]);
    }
    table
}
