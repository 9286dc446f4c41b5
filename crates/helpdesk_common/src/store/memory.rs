//! In-memory store
//!
//! Plain vectors behind the store traits. Used by tests and by embedders
//! that already hold their records in memory.

use chrono::{DateTime, Utc};
use tracing::warn;

use super::{PatternStore, TicketStore};
use crate::error::Result;
use crate::models::{
    AppliedSolution, Outcome, Pattern, PatternDraft, PatternId, Solution, Ticket, TicketId,
    TicketSolution, UpsertOutcome,
};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tickets: Vec<Ticket>,
    solutions: Vec<Solution>,
    applications: Vec<TicketSolution>,
    patterns: Vec<Pattern>,
    next_pattern_id: PatternId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a ticket (by id)
    pub fn add_ticket(&mut self, ticket: Ticket) {
        self.tickets.retain(|t| t.id != ticket.id);
        self.tickets.push(ticket);
    }

    /// Insert or replace a solution (by id)
    pub fn add_solution(&mut self, solution: Solution) {
        self.solutions.retain(|s| s.id != solution.id);
        self.solutions.push(solution);
    }

    /// Record an application; one record per (ticket, solution)
    pub fn record_application(&mut self, application: TicketSolution) {
        if let Some(existing) = self.applications.iter_mut().find(|a| {
            a.ticket_id == application.ticket_id && a.solution_id == application.solution_id
        }) {
            existing.outcome = application.outcome;
            existing.notes = application.notes;
            return;
        }
        self.applications.push(application);
    }

    /// Mark a pattern inactive (patterns are never deleted)
    pub fn deactivate_pattern(&mut self, id: PatternId) {
        if let Some(p) = self.patterns.iter_mut().find(|p| p.id == id) {
            p.is_active = false;
        }
    }
}

impl TicketStore for MemoryStore {
    fn ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.tickets.iter().find(|t| t.id == id).cloned())
    }

    fn tickets_since(&self, since: DateTime<Utc>) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|t| t.created_at >= since)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tickets)
    }

    fn active_solutions(&self) -> Result<Vec<Solution>> {
        let mut solutions: Vec<Solution> =
            self.solutions.iter().filter(|s| s.is_active).cloned().collect();
        solutions.sort_by_key(|s| s.id);
        Ok(solutions)
    }

    fn successful_applications(&self) -> Result<Vec<AppliedSolution>> {
        let mut joined = Vec::new();
        for application in self
            .applications
            .iter()
            .filter(|a| a.outcome == Outcome::Succeeded)
        {
            let ticket = self.tickets.iter().find(|t| t.id == application.ticket_id);
            let solution = self.solutions.iter().find(|s| s.id == application.solution_id);
            match (ticket, solution) {
                (Some(ticket), Some(solution)) => joined.push(AppliedSolution {
                    application: application.clone(),
                    ticket: ticket.clone(),
                    solution: solution.clone(),
                }),
                _ => warn!(
                    ticket_id = application.ticket_id,
                    solution_id = application.solution_id,
                    "Skipping application with dangling reference"
                ),
            }
        }
        Ok(joined)
    }
}

impl PatternStore for MemoryStore {
    fn patterns(&self) -> Result<Vec<Pattern>> {
        Ok(self.patterns.clone())
    }

    fn active_patterns(&self, min_confidence: f64) -> Result<Vec<Pattern>> {
        Ok(self
            .patterns
            .iter()
            .filter(|p| p.is_active && p.confidence >= min_confidence)
            .cloned()
            .collect())
    }

    fn upsert_pattern(
        &mut self,
        draft: &PatternDraft,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        if let Some(existing) = self
            .patterns
            .iter_mut()
            .find(|p| p.kind == draft.kind && p.key == draft.key)
        {
            existing.times_matched = draft.times_matched;
            existing.confidence = draft.confidence;
            existing.last_seen = now;
            return Ok(UpsertOutcome::Refreshed(existing.id));
        }

        self.next_pattern_id += 1;
        let id = self.next_pattern_id;
        self.patterns.push(Pattern {
            id,
            kind: draft.kind,
            key: draft.key.clone(),
            matching_keywords: draft.matching_keywords.clone(),
            category_id: draft.category_id,
            confidence: draft.confidence,
            times_matched: draft.times_matched,
            solution_ids: draft.solution_ids.clone(),
            data: draft.data.clone(),
            last_seen: now,
            is_active: true,
        });
        Ok(UpsertOutcome::Created(id))
    }
}
