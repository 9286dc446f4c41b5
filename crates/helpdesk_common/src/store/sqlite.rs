//! SQLite store
//!
//! Persistent implementation of the store traits on top of rusqlite.
//!
//! Schema:
//! - categories, users: lookup tables
//! - tickets, solutions, ticket_solutions: owned by the help-desk app
//! - patterns: one row per (kind, pattern_key), written by the analyzer
//! - pattern_solutions: many-to-many pattern -> solution links
//!
//! Timestamps are stored as unix seconds (INTEGER).

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::{PatternStore, TicketStore};
use crate::error::Result;
use crate::keywords::parse_keyword_list;
use crate::models::{
    AppliedSolution, Category, Outcome, Pattern, PatternDraft, PatternId, PatternKind,
    Solution, SolutionId, Ticket, TicketId, TicketSolution, TicketStatus, UpsertOutcome,
    UserRef,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category_id INTEGER,
    status TEXT NOT NULL DEFAULT 'open',
    created_by INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    resolved_at INTEGER,
    resolution TEXT
);

CREATE INDEX IF NOT EXISTS idx_tickets_created_at ON tickets(created_at);

CREATE TABLE IF NOT EXISTS solutions (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    steps TEXT NOT NULL DEFAULT '',
    category_id INTEGER,
    keywords TEXT NOT NULL DEFAULT '',
    times_suggested INTEGER NOT NULL DEFAULT 0,
    times_successful INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS ticket_solutions (
    ticket_id INTEGER NOT NULL,
    solution_id INTEGER NOT NULL,
    outcome TEXT NOT NULL DEFAULT 'unknown',
    notes TEXT NOT NULL DEFAULT '',
    applied_at INTEGER NOT NULL,
    PRIMARY KEY (ticket_id, solution_id)
);

CREATE INDEX IF NOT EXISTS idx_ticket_solutions_outcome ON ticket_solutions(outcome);

CREATE TABLE IF NOT EXISTS patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    pattern_key TEXT NOT NULL,
    matching_keywords TEXT NOT NULL DEFAULT '',
    category_id INTEGER,
    confidence REAL NOT NULL,
    times_matched INTEGER NOT NULL DEFAULT 0,
    data TEXT NOT NULL DEFAULT '{}',
    last_seen INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    UNIQUE (kind, pattern_key)
);

CREATE TABLE IF NOT EXISTS pattern_solutions (
    pattern_id INTEGER NOT NULL,
    solution_id INTEGER NOT NULL,
    PRIMARY KEY (pattern_id, solution_id)
);
"#;

const TICKET_COLUMNS: &str = "t.id, t.title, t.description, t.category_id, tc.name, t.status, \
     t.created_by, COALESCE(u.username, ''), t.created_at, t.resolved_at, t.resolution";
const TICKET_JOINS: &str = "LEFT JOIN categories tc ON tc.id = t.category_id \
     LEFT JOIN users u ON u.id = t.created_by";
const TICKET_COLUMN_COUNT: usize = 11;

const SOLUTION_COLUMNS: &str = "s.id, s.title, s.description, s.steps, s.category_id, sc.name, \
     s.keywords, s.times_suggested, s.times_successful, s.is_active";
const SOLUTION_JOINS: &str = "LEFT JOIN categories sc ON sc.id = s.category_id";

const PATTERN_COLUMNS: &str = "id, kind, pattern_key, matching_keywords, category_id, \
     confidence, times_matched, data, last_seen, is_active";

// ============================================================================
// Column conversions
// ============================================================================

impl FromSql for TicketStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TicketStatus::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown ticket status '{}'", s).into()))
    }
}

impl ToSql for TicketStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Outcome {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Outcome::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown outcome '{}'", s).into()))
    }
}

impl ToSql for Outcome {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PatternKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        PatternKind::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown pattern kind '{}'", s).into()))
    }
}

impl ToSql for PatternKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Unix-seconds column
struct UnixTime(DateTime<Utc>);

impl FromSql for UnixTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let secs = value.as_i64()?;
        DateTime::from_timestamp(secs, 0)
            .map(UnixTime)
            .ok_or(FromSqlError::OutOfRange(secs))
    }
}

fn category_at(row: &Row<'_>, id_idx: usize) -> rusqlite::Result<Option<Category>> {
    let id: Option<i64> = row.get(id_idx)?;
    let name: Option<String> = row.get(id_idx + 1)?;
    Ok(id.map(|id| Category {
        id,
        name: name.unwrap_or_default(),
    }))
}

fn ticket_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(base)?,
        title: row.get(base + 1)?,
        description: row.get(base + 2)?,
        category: category_at(row, base + 3)?,
        status: row.get(base + 5)?,
        created_by: UserRef {
            id: row.get(base + 6)?,
            username: row.get(base + 7)?,
        },
        created_at: row.get::<_, UnixTime>(base + 8)?.0,
        resolved_at: row.get::<_, Option<UnixTime>>(base + 9)?.map(|t| t.0),
        resolution: row.get(base + 10)?,
    })
}

fn solution_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Solution> {
    Ok(Solution {
        id: row.get(base)?,
        title: row.get(base + 1)?,
        description: row.get(base + 2)?,
        steps: row.get(base + 3)?,
        category: category_at(row, base + 4)?,
        keywords: row.get(base + 6)?,
        times_suggested: row.get(base + 7)?,
        times_successful: row.get(base + 8)?,
        is_active: row.get(base + 9)?,
    })
}

/// Pattern row with its JSON payload still unparsed
fn pattern_row(row: &Row<'_>) -> rusqlite::Result<(Pattern, String)> {
    let keywords: String = row.get(3)?;
    let pattern = Pattern {
        id: row.get(0)?,
        kind: row.get(1)?,
        key: row.get(2)?,
        matching_keywords: parse_keyword_list(&keywords),
        category_id: row.get(4)?,
        confidence: row.get(5)?,
        times_matched: row.get(6)?,
        solution_ids: Vec::new(),
        data: serde_json::Value::Null,
        last_seen: row.get::<_, UnixTime>(8)?.0,
        is_active: row.get(9)?,
    };
    Ok((pattern, row.get(7)?))
}

// ============================================================================
// Store
// ============================================================================

/// SQLite-backed help-desk store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path_ref)?;
        // WAL lets the CLI read while a watch loop writes
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// Fresh private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    // ------------------------------------------------------------------
    // Writers used by fixture import and by embedding applications
    // ------------------------------------------------------------------

    pub fn insert_category(&self, category: &Category) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO categories (id, name) VALUES (?1, ?2)",
            params![category.id, &category.name],
        )?;
        Ok(())
    }

    pub fn insert_user(&self, user: &UserRef) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users (id, username) VALUES (?1, ?2)",
            params![user.id, &user.username],
        )?;
        Ok(())
    }

    pub fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tickets
                (id, title, description, category_id, status, created_by, created_at,
                 resolved_at, resolution)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                ticket.id,
                &ticket.title,
                &ticket.description,
                ticket.category_id(),
                ticket.status,
                ticket.created_by.id,
                ticket.created_at.timestamp(),
                ticket.resolved_at.map(|t| t.timestamp()),
                &ticket.resolution,
            ],
        )?;
        Ok(())
    }

    pub fn insert_solution(&self, solution: &Solution) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO solutions
                (id, title, description, steps, category_id, keywords,
                 times_suggested, times_successful, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                solution.id,
                &solution.title,
                &solution.description,
                &solution.steps,
                solution.category_id(),
                &solution.keywords,
                solution.times_suggested,
                solution.times_successful,
                solution.is_active,
            ],
        )?;
        Ok(())
    }

    /// Whether a solution row exists, active or not
    pub fn solution_exists(&self, id: SolutionId) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM solutions WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Record an application; a second record for the same (ticket, solution)
    /// updates outcome and notes
    pub fn record_application(&self, application: &TicketSolution) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ticket_solutions (ticket_id, solution_id, outcome, notes, applied_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(ticket_id, solution_id)
             DO UPDATE SET outcome = excluded.outcome, notes = excluded.notes",
            params![
                application.ticket_id,
                application.solution_id,
                application.outcome,
                &application.notes,
                application.applied_at.timestamp(),
            ],
        )?;
        Ok(())
    }

    fn pattern_links(&self) -> Result<HashMap<PatternId, Vec<SolutionId>>> {
        let mut stmt = self.conn.prepare(
            "SELECT pattern_id, solution_id FROM pattern_solutions
             ORDER BY pattern_id, solution_id",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;

        let mut links: HashMap<PatternId, Vec<SolutionId>> = HashMap::new();
        for row in rows {
            let (pattern_id, solution_id) = row?;
            links.entry(pattern_id).or_default().push(solution_id);
        }
        Ok(links)
    }

    /// Patterns with their links; `None` loads every row
    fn load_patterns(&self, min_confidence: Option<f64>) -> Result<Vec<Pattern>> {
        let rows: Vec<(Pattern, String)> = match min_confidence {
            Some(min) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM patterns WHERE is_active = 1 AND confidence >= ?1 ORDER BY id",
                    PATTERN_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![min], pattern_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("SELECT {} FROM patterns ORDER BY id", PATTERN_COLUMNS))?;
                let rows = stmt
                    .query_map([], pattern_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        let mut links = self.pattern_links()?;
        let mut patterns = Vec::with_capacity(rows.len());
        for (mut pattern, data) in rows {
            pattern.data = serde_json::from_str(&data)?;
            pattern.solution_ids = links.remove(&pattern.id).unwrap_or_default();
            patterns.push(pattern);
        }
        Ok(patterns)
    }
}

impl TicketStore for SqliteStore {
    fn ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        let sql = format!(
            "SELECT {} FROM tickets t {} WHERE t.id = ?1",
            TICKET_COLUMNS, TICKET_JOINS
        );
        let ticket = self
            .conn
            .query_row(&sql, params![id], |row| ticket_at(row, 0))
            .optional()?;
        Ok(ticket)
    }

    fn tickets_since(&self, since: DateTime<Utc>) -> Result<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM tickets t {} WHERE t.created_at >= ?1 ORDER BY t.created_at, t.id",
            TICKET_COLUMNS, TICKET_JOINS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![since.timestamp()], |row| ticket_at(row, 0))?;

        let mut tickets = Vec::new();
        for row in rows {
            tickets.push(row?);
        }
        Ok(tickets)
    }

    fn active_solutions(&self) -> Result<Vec<Solution>> {
        let sql = format!(
            "SELECT {} FROM solutions s {} WHERE s.is_active = 1 ORDER BY s.id",
            SOLUTION_COLUMNS, SOLUTION_JOINS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| solution_at(row, 0))?;

        let mut solutions = Vec::new();
        for row in rows {
            solutions.push(row?);
        }
        Ok(solutions)
    }

    fn successful_applications(&self) -> Result<Vec<AppliedSolution>> {
        let sql = format!(
            "SELECT a.ticket_id, a.solution_id, a.outcome, a.notes, a.applied_at, {}, {}
             FROM ticket_solutions a
             JOIN tickets t ON t.id = a.ticket_id
             JOIN solutions s ON s.id = a.solution_id
             {} {}
             WHERE a.outcome = 'succeeded'
             ORDER BY a.applied_at, a.ticket_id, a.solution_id",
            TICKET_COLUMNS, SOLUTION_COLUMNS, TICKET_JOINS, SOLUTION_JOINS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(AppliedSolution {
                application: TicketSolution {
                    ticket_id: row.get(0)?,
                    solution_id: row.get(1)?,
                    outcome: row.get(2)?,
                    notes: row.get(3)?,
                    applied_at: row.get::<_, UnixTime>(4)?.0,
                },
                ticket: ticket_at(row, 5)?,
                solution: solution_at(row, 5 + TICKET_COLUMN_COUNT)?,
            })
        })?;

        let mut applications = Vec::new();
        for row in rows {
            applications.push(row?);
        }
        Ok(applications)
    }
}

impl PatternStore for SqliteStore {
    fn patterns(&self) -> Result<Vec<Pattern>> {
        self.load_patterns(None)
    }

    fn active_patterns(&self, min_confidence: f64) -> Result<Vec<Pattern>> {
        self.load_patterns(Some(min_confidence))
    }

    fn upsert_pattern(
        &mut self,
        draft: &PatternDraft,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<PatternId> = tx
            .query_row(
                "SELECT id FROM patterns WHERE kind = ?1 AND pattern_key = ?2",
                params![draft.kind, &draft.key],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE patterns SET times_matched = ?1, confidence = ?2, last_seen = ?3
                     WHERE id = ?4",
                    params![draft.times_matched, draft.confidence, now.timestamp(), id],
                )?;
                UpsertOutcome::Refreshed(id)
            }
            None => {
                tx.execute(
                    "INSERT INTO patterns
                        (kind, pattern_key, matching_keywords, category_id, confidence,
                         times_matched, data, last_seen, is_active)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)",
                    params![
                        draft.kind,
                        &draft.key,
                        draft.matching_keywords.join(","),
                        draft.category_id,
                        draft.confidence,
                        draft.times_matched,
                        serde_json::to_string(&draft.data)?,
                        now.timestamp(),
                    ],
                )?;
                let id = tx.last_insert_rowid();
                {
                    let mut stmt = tx.prepare(
                        "INSERT OR IGNORE INTO pattern_solutions (pattern_id, solution_id)
                         VALUES (?1, ?2)",
                    )?;
                    for solution_id in &draft.solution_ids {
                        stmt.execute(params![id, solution_id])?;
                    }
                }
                UpsertOutcome::Created(id)
            }
        };

        tx.commit()?;
        debug!(kind = %draft.kind, key = %draft.key, ?outcome, "Pattern upserted");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::NamedTempFile;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap()
    }

    fn hardware() -> Category {
        Category {
            id: 1,
            name: "Hardware".to_string(),
        }
    }

    fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_category(&hardware()).unwrap();
        store
            .insert_user(&UserRef {
                id: 9,
                username: "bob".to_string(),
            })
            .unwrap();
        store
            .insert_ticket(&Ticket {
                id: 100,
                title: "Printer offline".to_string(),
                description: "The office printer shows offline".to_string(),
                category: Some(hardware()),
                status: TicketStatus::Resolved,
                created_by: UserRef {
                    id: 9,
                    username: "bob".to_string(),
                },
                created_at: now() - Duration::days(3),
                resolved_at: Some(now() - Duration::days(2)),
                resolution: Some("Power cycled".to_string()),
            })
            .unwrap();
        store
            .insert_solution(&Solution {
                id: 5,
                title: "Power cycle printer".to_string(),
                description: "Turn the printer off and on".to_string(),
                steps: "1. Off\n2. On".to_string(),
                category: Some(hardware()),
                keywords: "printer, offline".to_string(),
                times_suggested: 4,
                times_successful: 3,
                is_active: true,
            })
            .unwrap();
        store
    }

    fn draft(key: &str) -> PatternDraft {
        PatternDraft {
            kind: PatternKind::Keyword,
            key: key.to_string(),
            matching_keywords: vec![key.to_string()],
            category_id: None,
            confidence: 82.5,
            times_matched: 4,
            solution_ids: vec![5],
            data: serde_json::json!({ "keyword": key, "ticket_count": 4 }),
        }
    }

    #[test]
    fn test_ticket_round_trip() {
        let store = seeded();
        let ticket = store.ticket(100).unwrap().unwrap();
        assert_eq!(ticket.title, "Printer offline");
        assert_eq!(ticket.category, Some(hardware()));
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.created_by.username, "bob");
        assert_eq!(ticket.created_at, now() - Duration::days(3));
        assert!(store.ticket(404).unwrap().is_none());
    }

    #[test]
    fn test_tickets_since_window() {
        let store = seeded();
        assert_eq!(store.tickets_since(now() - Duration::days(7)).unwrap().len(), 1);
        assert!(store.tickets_since(now() - Duration::days(1)).unwrap().is_empty());
    }

    #[test]
    fn test_active_solutions_skip_inactive() {
        let store = seeded();
        let mut retired = store.active_solutions().unwrap()[0].clone();
        retired.id = 6;
        retired.is_active = false;
        store.insert_solution(&retired).unwrap();

        let active = store.active_solutions().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 5);
        assert_eq!(active[0].times_successful, 3);
    }

    #[test]
    fn test_solution_exists_includes_inactive() {
        let store = seeded();
        let mut retired = store.active_solutions().unwrap()[0].clone();
        retired.id = 6;
        retired.is_active = false;
        store.insert_solution(&retired).unwrap();

        assert!(store.solution_exists(5).unwrap());
        assert!(store.solution_exists(6).unwrap());
        assert!(!store.solution_exists(404).unwrap());
    }

    #[test]
    fn test_successful_applications_join() {
        let store = seeded();
        store
            .record_application(&TicketSolution {
                ticket_id: 100,
                solution_id: 5,
                outcome: Outcome::Unknown,
                notes: String::new(),
                applied_at: now(),
            })
            .unwrap();
        assert!(store.successful_applications().unwrap().is_empty());

        // Same pair again updates the outcome instead of duplicating
        store
            .record_application(&TicketSolution {
                ticket_id: 100,
                solution_id: 5,
                outcome: Outcome::Succeeded,
                notes: "worked".to_string(),
                applied_at: now(),
            })
            .unwrap();
        let applied = store.successful_applications().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].ticket.id, 100);
        assert_eq!(applied[0].solution.id, 5);
        assert_eq!(applied[0].application.notes, "worked");
    }

    #[test]
    fn test_upsert_creates_then_refreshes() {
        let mut store = seeded();
        let created = store.upsert_pattern(&draft("printer"), now()).unwrap();
        assert!(created.was_created());

        let mut again = draft("printer");
        again.confidence = 91.0;
        again.times_matched = 7;
        again.solution_ids = vec![];
        again.matching_keywords = vec!["other".to_string()];
        let later = now() + Duration::hours(2);
        let refreshed = store.upsert_pattern(&again, later).unwrap();
        assert_eq!(refreshed, UpsertOutcome::Refreshed(created.id()));

        let patterns = store.patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.kind, PatternKind::Keyword);
        assert_eq!(p.confidence, 91.0);
        assert_eq!(p.times_matched, 7);
        assert_eq!(p.last_seen, later);
        assert_eq!(p.solution_ids, vec![5]);
        assert_eq!(p.matching_keywords, vec!["printer"]);
        assert_eq!(p.data["ticket_count"], 4);
    }

    #[test]
    fn test_active_patterns_confidence_floor() {
        let mut store = seeded();
        store.upsert_pattern(&draft("printer"), now()).unwrap();
        let mut weak = draft("scanner");
        weak.confidence = 40.0;
        store.upsert_pattern(&weak, now()).unwrap();

        assert_eq!(store.patterns().unwrap().len(), 2);
        let active = store.active_patterns(60.0).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, "printer");
    }

    #[test]
    fn test_open_at_persists() {
        let tmp = NamedTempFile::new().unwrap();
        {
            let mut store = SqliteStore::open_at(tmp.path()).unwrap();
            store.upsert_pattern(&draft("printer"), now()).unwrap();
        }
        let store = SqliteStore::open_at(tmp.path()).unwrap();
        assert_eq!(store.patterns().unwrap().len(), 1);
    }
}
