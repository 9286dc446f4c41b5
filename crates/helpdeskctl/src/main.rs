//! Helpdesk Control - CLI for the help-desk heuristics
//!
//! Suggests solutions for tickets and mines recurring ticket patterns.

use clap::Parser;
use helpdeskctl::cli::Cli;
use helpdeskctl::commands::{self, Context};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    init_logging(&ctx.config.log.level);
    commands::run(&ctx, cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red(), err);
            ExitCode::from(commands::exit_code(&err) as u8)
        }
    }
}
