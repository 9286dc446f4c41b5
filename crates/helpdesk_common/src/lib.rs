//! Helpdesk Common - heuristic core for IT help-desk tickets
//!
//! Keyword extraction, ranked solution suggestions and recurring pattern
//! mining over a help-desk data layer. No machine learning, only counting.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod keywords;
pub mod models;
pub mod pattern_analyzer;
pub mod store;
pub mod suggestion_engine;

pub use config::HelpdeskConfig;
pub use error::{HelpdeskError, Result};
pub use models::*;
pub use pattern_analyzer::{AnalysisSummary, PatternAnalyzer};
pub use store::{MemoryStore, PatternStore, SqliteStore, TicketStore};
pub use suggestion_engine::{Suggestion, SuggestionEngine, SuggestionMethod};
