//! Fixture import - seed a database from a JSON dataset
//!
//! A fixture is one JSON document with five arrays:
//!
//! ```json
//! { "categories": [], "users": [], "solutions": [], "tickets": [], "applications": [] }
//! ```
//!
//! Tickets and solutions refer to categories and users by id; applications
//! refer to tickets and solutions in the fixture or already stored. The whole
//! document is written in a single transaction, so a bad reference leaves
//! the database untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{HelpdeskError, Result};
use crate::models::{
    Category, CategoryId, Solution, SolutionId, Ticket, TicketId, TicketSolution, TicketStatus,
    UserId, UserRef,
};
use crate::store::{SqliteStore, TicketStore};

#[derive(Debug, Clone, Deserialize)]
pub struct TicketRecord {
    pub id: TicketId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: TicketStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolutionRecord {
    pub id: SolutionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub times_suggested: u32,
    #[serde(default)]
    pub times_successful: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub users: Vec<UserRef>,
    #[serde(default)]
    pub solutions: Vec<SolutionRecord>,
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    #[serde(default)]
    pub applications: Vec<TicketSolution>,
}

/// Rows written by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub categories: usize,
    pub users: usize,
    pub solutions: usize,
    pub tickets: usize,
    pub applications: usize,
}

impl Fixture {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Read and parse a fixture file
pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let content = fs::read_to_string(path)?;
    Fixture::from_json(&content)
}

fn unknown_reference(owner: &str, kind: &str, id: i64) -> HelpdeskError {
    HelpdeskError::Corrupt(format!("{} refers to unknown {} {}", owner, kind, id))
}

fn lookup_category(
    categories: &HashMap<CategoryId, &Category>,
    id: Option<CategoryId>,
    owner: &str,
) -> Result<Option<Category>> {
    match id {
        None => Ok(None),
        Some(id) => categories
            .get(&id)
            .map(|c| Some((*c).clone()))
            .ok_or_else(|| unknown_reference(owner, "category", id)),
    }
}

/// Write every record of `fixture` into `store`, all or nothing
pub fn import_fixture(store: &SqliteStore, fixture: &Fixture) -> Result<ImportCounts> {
    let categories: HashMap<CategoryId, &Category> =
        fixture.categories.iter().map(|c| (c.id, c)).collect();
    let users: HashMap<UserId, &UserRef> = fixture.users.iter().map(|u| (u.id, u)).collect();

    let tx = store.connection().unchecked_transaction()?;

    for category in &fixture.categories {
        store.insert_category(category)?;
    }
    for user in &fixture.users {
        store.insert_user(user)?;
    }

    for record in &fixture.solutions {
        let owner = format!("solution {}", record.id);
        store.insert_solution(&Solution {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            steps: record.steps.clone(),
            category: lookup_category(&categories, record.category_id, &owner)?,
            keywords: record.keywords.clone(),
            times_suggested: record.times_suggested,
            times_successful: record.times_successful,
            is_active: record.is_active,
        })?;
    }

    for record in &fixture.tickets {
        let owner = format!("ticket {}", record.id);
        let created_by = users
            .get(&record.created_by)
            .ok_or_else(|| unknown_reference(&owner, "user", record.created_by))?;
        store.insert_ticket(&Ticket {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            category: lookup_category(&categories, record.category_id, &owner)?,
            status: record.status,
            created_by: (*created_by).clone(),
            created_at: record.created_at,
            resolved_at: record.resolved_at,
            resolution: record.resolution.clone(),
        })?;
    }

    // Earlier imports count: applications may refer to rows already stored
    for application in &fixture.applications {
        let owner = format!(
            "application ({}, {})",
            application.ticket_id, application.solution_id
        );
        if store.ticket(application.ticket_id)?.is_none() {
            return Err(unknown_reference(&owner, "ticket", application.ticket_id));
        }
        if !store.solution_exists(application.solution_id)? {
            return Err(unknown_reference(&owner, "solution", application.solution_id));
        }
        store.record_application(application)?;
    }

    tx.commit()?;

    let counts = ImportCounts {
        categories: fixture.categories.len(),
        users: fixture.users.len(),
        solutions: fixture.solutions.len(),
        tickets: fixture.tickets.len(),
        applications: fixture.applications.len(),
    };
    info!(
        categories = counts.categories,
        users = counts.users,
        solutions = counts.solutions,
        tickets = counts.tickets,
        applications = counts.applications,
        "Fixture imported"
    );
    Ok(counts)
}
