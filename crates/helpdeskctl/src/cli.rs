//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Helpdesk CLI
#[derive(Parser, Debug)]
#[command(name = "helpdeskctl")]
#[command(about = "Helpdesk Assist - solution suggestions and ticket patterns", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $HELPDESK_CONFIG and /etc/helpdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides [database] path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Suggest solutions for a ticket
    Suggest {
        /// Ticket id
        ticket_id: i64,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Mine recent tickets for recurring patterns
    Analyze {
        /// Trailing window in days (default: [analysis] window_days)
        #[arg(long)]
        days: Option<u32>,

        /// List every pattern after the run
        #[arg(long)]
        verbose: bool,
    },

    /// List active patterns
    Patterns {
        /// Minimum confidence 0-100 (default: [suggestions] pattern_min_confidence)
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Rank solutions by success rate
    TopSolutions {
        /// Ignore solutions suggested fewer times than this
        #[arg(long, default_value_t = 5)]
        min_suggested: u32,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Load a JSON fixture into the database
    Import {
        /// Fixture file
        path: PathBuf,
    },

    /// Re-run the analysis periodically until Ctrl-C
    Watch {
        /// Trailing window in days (default: [analysis] window_days)
        #[arg(long)]
        days: Option<u32>,

        /// Seconds between runs (default: [analysis] watch_interval_secs)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}
