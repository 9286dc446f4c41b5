//! CLI integration tests for helpdeskctl
//!
//! Exercises argument parsing and the command handlers against a temporary
//! database seeded from demos/sample_data.json.

use clap::Parser;
use helpdesk_common::{HelpdeskConfig, SqliteStore, TicketStore};
use helpdeskctl::cli::{Cli, Commands};
use helpdeskctl::commands::{self, Context};
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/sample_data.json")
}

fn seeded_context(dir: &TempDir) -> Context {
    let ctx = Context::new(HelpdeskConfig::default(), Some(dir.path().join("helpdesk.db")));
    commands::handle_import(&ctx, &sample_fixture()).unwrap();
    ctx
}

#[test]
fn test_parse_suggest_with_globals() {
    let cli = Cli::try_parse_from([
        "helpdeskctl",
        "--db",
        "/tmp/h.db",
        "suggest",
        "42",
        "--json",
    ])
    .unwrap();
    assert_eq!(cli.db, Some(PathBuf::from("/tmp/h.db")));
    assert!(matches!(cli.command, Commands::Suggest { ticket_id: 42, json: true }));
}

#[test]
fn test_parse_top_solutions_defaults() {
    let cli = Cli::try_parse_from(["helpdeskctl", "top-solutions"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::TopSolutions { min_suggested: 5, limit: 10 }
    ));
}

#[test]
fn test_parse_rejects_non_numeric_ticket() {
    assert!(Cli::try_parse_from(["helpdeskctl", "suggest", "abc"]).is_err());
}

#[test]
fn test_db_override_beats_config() {
    let ctx = Context::new(HelpdeskConfig::default(), Some(PathBuf::from("/tmp/other.db")));
    assert_eq!(ctx.db_path, PathBuf::from("/tmp/other.db"));

    let ctx = Context::new(HelpdeskConfig::default(), None);
    assert_eq!(ctx.db_path, HelpdeskConfig::default().database.path);
}

#[test]
fn test_import_sample_data() {
    let dir = TempDir::new().unwrap();
    let ctx = seeded_context(&dir);

    let store = SqliteStore::open_at(&ctx.db_path).unwrap();
    let ticket = store.ticket(1).unwrap().unwrap();
    assert_eq!(ticket.title, "Printer not printing");
    // The toner solution ships inactive
    assert!(store.active_solutions().unwrap().iter().all(|s| s.id != 6));
}

#[test]
fn test_suggest_known_ticket() {
    let dir = TempDir::new().unwrap();
    let ctx = seeded_context(&dir);
    commands::handle_suggest(&ctx, 3, false).unwrap();
    commands::handle_suggest(&ctx, 3, true).unwrap();
}

#[test]
fn test_suggest_missing_ticket_exits_2() {
    let dir = TempDir::new().unwrap();
    let ctx = seeded_context(&dir);
    let err = commands::handle_suggest(&ctx, 9999, false).unwrap_err();
    assert_eq!(commands::exit_code(&err), 2);
}

#[test]
fn test_missing_fixture_exits_1() {
    let dir = TempDir::new().unwrap();
    let ctx = Context::new(HelpdeskConfig::default(), Some(dir.path().join("helpdesk.db")));
    let err = commands::handle_import(&ctx, &dir.path().join("nope.json")).unwrap_err();
    assert_eq!(commands::exit_code(&err), 1);
}

#[test]
fn test_analyze_patterns_and_top_solutions_run() {
    let dir = TempDir::new().unwrap();
    let ctx = seeded_context(&dir);
    commands::handle_analyze(&ctx, Some(365), true).unwrap();
    commands::handle_patterns(&ctx, Some(0.0), true).unwrap();
    commands::handle_top_solutions(&ctx, 5, 10).unwrap();
}
