mod bootstrap_helpers;
mod cli_args;
mod commands;
mod console_presenter;
mod demo_catalog;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::commands::execute_cli;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    execute_cli(cli, &mut stdout)
}
