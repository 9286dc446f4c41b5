//! Store - repository interfaces over the help-desk data layer
//!
//! The heuristics never talk to a database directly. They go through two
//! narrow traits that return fully materialized collections, so strategies
//! operate on plain data:
//!
//! - [`TicketStore`]: tickets, active solutions, successful applications
//! - [`PatternStore`]: pattern reads and the upsert-by-key write
//!
//! Two implementations ship with the crate: [`SqliteStore`] (persistent) and
//! [`MemoryStore`] (embedders and tests).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    AppliedSolution, Pattern, PatternDraft, Solution, Ticket, TicketId, UpsertOutcome,
};

/// Read access to tickets, solutions and application history
pub trait TicketStore {
    /// Single ticket by id
    fn ticket(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Tickets created at or after `since`, oldest first
    fn tickets_since(&self, since: DateTime<Utc>) -> Result<Vec<Ticket>>;

    /// All solutions with `is_active` set, ordered by id
    fn active_solutions(&self) -> Result<Vec<Solution>>;

    /// Applications with a succeeded outcome, joined with ticket and solution.
    /// Inactive solutions are included; callers decide whether to skip them.
    fn successful_applications(&self) -> Result<Vec<AppliedSolution>>;
}

/// Read/write access to persisted patterns
pub trait PatternStore {
    /// Every stored pattern, ordered by id
    fn patterns(&self) -> Result<Vec<Pattern>>;

    /// Active patterns with confidence >= `min_confidence`
    fn active_patterns(&self, min_confidence: f64) -> Result<Vec<Pattern>>;

    /// Create the pattern for (kind, key) or refresh the existing one.
    ///
    /// On creation every field of `draft` is stored, including solution
    /// links. On refresh only `times_matched`, `confidence` and `last_seen`
    /// change; links and matching keywords are kept.
    fn upsert_pattern(&mut self, draft: &PatternDraft, now: DateTime<Utc>)
        -> Result<UpsertOutcome>;
}
