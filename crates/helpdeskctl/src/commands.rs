//! Command handlers for helpdeskctl.

use anyhow::{Context as _, Result};
use helpdesk_common::config::AnalysisSettings;
use helpdesk_common::fixtures::{import_fixture, load_fixture};
use helpdesk_common::suggestion_engine::top_solutions;
use helpdesk_common::{
    HelpdeskConfig, HelpdeskError, PatternAnalyzer, PatternStore, SqliteStore, SuggestionEngine,
    TicketStore,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};
use crate::output;

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub config: HelpdeskConfig,
    pub db_path: PathBuf,
}

impl Context {
    /// Load the config file and apply command-line overrides
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = HelpdeskConfig::load(cli.config.as_deref())?;
        Ok(Self::new(config, cli.db.clone()))
    }

    pub fn new(config: HelpdeskConfig, db_override: Option<PathBuf>) -> Self {
        let db_path = db_override.unwrap_or_else(|| config.database.path.clone());
        Self { config, db_path }
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open_at(&self.db_path)
            .with_context(|| format!("opening database {}", self.db_path.display()))
    }

    /// Requested window, or the configured one, clamped to 1-365
    fn window_days(&self, requested: Option<u32>) -> u32 {
        let settings = AnalysisSettings {
            window_days: requested.unwrap_or(self.config.analysis.window_days),
            ..self.config.analysis.clone()
        };
        if settings.window_days_was_clamped() {
            warn!(
                requested = settings.window_days,
                effective = settings.effective_window_days(),
                "Window clamped"
            );
        }
        settings.effective_window_days()
    }

    fn analyzer(&self) -> PatternAnalyzer {
        PatternAnalyzer::new(self.config.analysis.clone())
    }
}

/// Dispatch one parsed command
pub fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Suggest { ticket_id, json } => handle_suggest(ctx, ticket_id, json),
        Commands::Analyze { days, verbose } => handle_analyze(ctx, days, verbose),
        Commands::Patterns { min_confidence, json } => handle_patterns(ctx, min_confidence, json),
        Commands::TopSolutions { min_suggested, limit } => {
            handle_top_solutions(ctx, min_suggested, limit)
        }
        Commands::Import { path } => handle_import(ctx, &path),
        Commands::Watch { days, interval_secs } => handle_watch(ctx, days, interval_secs),
    }
}

/// Handle suggest command
pub fn handle_suggest(ctx: &Context, ticket_id: i64, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let ticket = store
        .ticket(ticket_id)?
        .ok_or(HelpdeskError::TicketNotFound(ticket_id))?;

    let engine = SuggestionEngine::new(ctx.config.suggestions.clone());
    let suggestions = engine.suggest(&store, &ticket)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print!("{}", output::render_suggestions(&ticket, &suggestions));
    }
    Ok(())
}

/// Handle analyze command
pub fn handle_analyze(ctx: &Context, days: Option<u32>, verbose: bool) -> Result<()> {
    let mut store = ctx.open_store()?;
    let summary = ctx.analyzer().analyze_recent(&mut store, ctx.window_days(days))?;

    print!("{}", output::render_summary(&summary));
    if verbose {
        println!();
        print!("{}", output::render_patterns(&store.patterns()?));
    }
    Ok(())
}

/// Handle patterns command
pub fn handle_patterns(ctx: &Context, min_confidence: Option<f64>, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let floor = min_confidence
        .map(|c| c.clamp(0.0, 100.0))
        .unwrap_or_else(|| ctx.config.suggestions.effective_pattern_min_confidence());
    let patterns = store.active_patterns(floor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&patterns)?);
    } else {
        print!("{}", output::render_patterns(&patterns));
    }
    Ok(())
}

/// Handle top-solutions command
pub fn handle_top_solutions(ctx: &Context, min_suggested: u32, limit: usize) -> Result<()> {
    let store = ctx.open_store()?;
    let solutions = top_solutions(&store, min_suggested, limit)?;
    print!("{}", output::render_top_solutions(&solutions));
    Ok(())
}

/// Handle import command
pub fn handle_import(ctx: &Context, path: &Path) -> Result<()> {
    let fixture =
        load_fixture(path).with_context(|| format!("reading fixture {}", path.display()))?;
    let store = ctx.open_store()?;
    let counts = import_fixture(&store, &fixture)?;
    print!("{}", output::render_import(&counts));
    Ok(())
}

/// Handle watch command: analyze on every tick until Ctrl-C
pub fn handle_watch(ctx: &Context, days: Option<u32>, interval_secs: Option<u64>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(ctx, days, interval_secs))
}

async fn watch_loop(ctx: &Context, days: Option<u32>, interval_secs: Option<u64>) -> Result<()> {
    let mut store = ctx.open_store()?;
    let analyzer = ctx.analyzer();
    let window_days = ctx.window_days(days);

    let settings = AnalysisSettings {
        watch_interval_secs: interval_secs.unwrap_or(ctx.config.analysis.watch_interval_secs),
        ..ctx.config.analysis.clone()
    };
    let period = Duration::from_secs(settings.effective_watch_interval());

    info!(
        window_days,
        interval_secs = period.as_secs(),
        "Watching for ticket patterns (Ctrl-C to stop)"
    );

    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A failed run is retried on the next tick
                match analyzer.analyze_recent(&mut store, window_days) {
                    Ok(summary) => print!("{}", output::render_summary(&summary)),
                    Err(e) => warn!(error = %e, "Analysis run failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down watch loop");
                break;
            }
        }
    }
    Ok(())
}

/// Process exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<HelpdeskError>()
        .map(HelpdeskError::exit_code)
        .unwrap_or(1)
}
