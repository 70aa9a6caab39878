use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = template_kit::cli::Cli::parse();
    template_kit::util::logging::init(cli.verbose);
    cli.run()
}
