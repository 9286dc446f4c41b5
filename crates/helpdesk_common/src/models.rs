//! Data model shared by the store, the suggestion engine and the analyzer.
//!
//! Tickets, solutions and application records belong to the surrounding
//! help-desk application. Patterns are written only by the analyzer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::keywords::extract_keywords;

pub type TicketId = i64;
pub type SolutionId = i64;
pub type CategoryId = i64;
pub type UserId = i64;
pub type PatternId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Ticket creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
}

/// Ticket workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(TicketStatus::Open),
            "in_progress" | "in-progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub status: TicketStatus,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl Ticket {
    pub fn is_resolved(&self) -> bool {
        self.status == TicketStatus::Resolved
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Salient terms of title + description
    pub fn keywords(&self) -> BTreeSet<String> {
        extract_keywords(&format!("{} {}", self.title, self.description))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub id: SolutionId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// Free-text, comma separated keyword field
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub times_suggested: u32,
    #[serde(default)]
    pub times_successful: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Solution {
    /// Success percentage in [0, 100]; 0.0 when never suggested
    pub fn success_rate(&self) -> f64 {
        if self.times_suggested == 0 {
            return 0.0;
        }
        let rate = self.times_successful as f64 / self.times_suggested as f64 * 100.0;
        rate.min(100.0)
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Salient terms of title + description + keyword field
    pub fn search_terms(&self) -> BTreeSet<String> {
        extract_keywords(&format!(
            "{} {} {}",
            self.title, self.description, self.keywords
        ))
    }
}

/// Result of applying a solution to a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "failed",
            Outcome::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "succeeded" => Some(Outcome::Succeeded),
            "failed" => Some(Outcome::Failed),
            "unknown" => Some(Outcome::Unknown),
            _ => None,
        }
    }
}

/// Application record: one solution applied to one ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSolution {
    pub ticket_id: TicketId,
    pub solution_id: SolutionId,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub notes: String,
    pub applied_at: DateTime<Utc>,
}

/// A successful application joined with its ticket and solution
#[derive(Debug, Clone)]
pub struct AppliedSolution {
    pub application: TicketSolution,
    pub ticket: Ticket,
    pub solution: Solution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Keyword,
    Category,
    Time,
    User,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Keyword => "keyword",
            PatternKind::Category => "category",
            PatternKind::Time => "time",
            PatternKind::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "keyword" => Some(PatternKind::Keyword),
            "category" => Some(PatternKind::Category),
            "time" => Some(PatternKind::Time),
            "user" => Some(PatternKind::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted recurring regularity in ticket data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    pub kind: PatternKind,
    /// Distinguishing key, unique per kind
    pub key: String,
    pub matching_keywords: Vec<String>,
    pub category_id: Option<CategoryId>,
    /// Confidence in [0, 100]
    pub confidence: f64,
    pub times_matched: u32,
    pub solution_ids: Vec<SolutionId>,
    pub data: serde_json::Value,
    pub last_seen: DateTime<Utc>,
    pub is_active: bool,
}

/// What the analyzer proposes to store for one (kind, key)
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDraft {
    pub kind: PatternKind,
    pub key: String,
    pub matching_keywords: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub confidence: f64,
    pub times_matched: u32,
    pub solution_ids: Vec<SolutionId>,
    pub data: serde_json::Value,
}

/// Whether an upsert created a row or refreshed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(PatternId),
    Refreshed(PatternId),
}

impl UpsertOutcome {
    pub fn id(&self) -> PatternId {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Refreshed(id) => *id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, UpsertOutcome::Created(_))
    }
}
