//! Pattern Analyzer - recurring regularities in recent tickets
//!
//! Mines four pattern classes over a trailing window:
//!
//! - keyword: tickets sharing an extracted term
//! - category: tickets in one category, described by their common terms
//! - time: categories piling up on an over-represented weekday
//! - user: creators filing far more tickets than average
//!
//! Every class applies the same two gates (minimum occurrences, minimum
//! confidence). Surviving drafts are upserted by (kind, key): a new row gets
//! the solutions that worked on 2+ tickets of its group, an existing row only
//! has its counters and last-seen refreshed.
//!
//! Time patterns are descriptive only. The weekday and category live in the
//! key and payload, with no category link and no solutions, so they never
//! feed the suggestion engine's category bonus.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

use crate::config::AnalysisSettings;
use crate::error::Result;
use crate::keywords::top_terms;
use crate::models::{
    AppliedSolution, CategoryId, PatternDraft, PatternKind, SolutionId, Ticket, TicketId,
    UpsertOutcome, UserId,
};
use crate::store::{PatternStore, TicketStore};

/// Keyword and category confidences never exceed this
const PATTERN_CONFIDENCE_CAP: f64 = 95.0;

/// User pattern confidences never exceed this
const USER_CONFIDENCE_CAP: f64 = 90.0;

/// Day flagged when its ticket count exceeds this multiple of the daily mean
const BUSY_DAY_FACTOR: f64 = 1.5;

/// User flagged at this multiple of the per-user mean
const BUSY_USER_FACTOR: f64 = 2.0;

const CATEGORY_TOP_KEYWORDS: usize = 10;
const USER_TOP_KEYWORDS: usize = 5;

/// A term must appear in this many tickets of a group to describe it
const MIN_TERM_TICKETS: usize = 2;

/// A solution must have worked on this many tickets of a group to be linked
const MIN_SOLUTION_WINS: usize = 2;

/// Result of one analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub tickets_analyzed: usize,
    /// Patterns created by this run
    pub patterns_found: usize,
    /// Existing patterns re-discovered and refreshed
    pub patterns_refreshed: usize,
}

/// Ticket with its keyword set computed once per run
struct AnalyzedTicket<'a> {
    ticket: &'a Ticket,
    keywords: BTreeSet<String>,
}

/// Successful solutions per ticket
#[derive(Debug, Default)]
pub struct SolutionWins {
    by_ticket: HashMap<TicketId, BTreeSet<SolutionId>>,
}

impl SolutionWins {
    pub fn from_history(history: &[AppliedSolution]) -> Self {
        let mut by_ticket: HashMap<TicketId, BTreeSet<SolutionId>> = HashMap::new();
        for applied in history {
            by_ticket
                .entry(applied.application.ticket_id)
                .or_default()
                .insert(applied.application.solution_id);
        }
        Self { by_ticket }
    }

    /// Solutions that succeeded on at least `MIN_SOLUTION_WINS` of `tickets`,
    /// sorted by id
    fn common_to<'a, I>(&self, tickets: I) -> Vec<SolutionId>
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let mut counts: BTreeMap<SolutionId, usize> = BTreeMap::new();
        for ticket in tickets {
            if let Some(wins) = self.by_ticket.get(&ticket.id) {
                for solution_id in wins {
                    *counts.entry(*solution_id).or_insert(0) += 1;
                }
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count >= MIN_SOLUTION_WINS)
            .map(|(id, _)| id)
            .collect()
    }
}

fn resolved_fraction(group: &[&AnalyzedTicket<'_>]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    let resolved = group.iter().filter(|t| t.ticket.is_resolved()).count();
    resolved as f64 / group.len() as f64
}

#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    settings: AnalysisSettings,
}

impl PatternAnalyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze the trailing `window_days` ending now
    pub fn analyze_recent<S>(&self, store: &mut S, window_days: u32) -> Result<AnalysisSummary>
    where
        S: TicketStore + PatternStore,
    {
        self.analyze(store, window_days, Utc::now())
    }

    /// Analyze tickets created in `[now - window_days, now]` and persist the
    /// patterns that clear both gates
    pub fn analyze<S>(
        &self,
        store: &mut S,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<AnalysisSummary>
    where
        S: TicketStore + PatternStore,
    {
        // Windows reaching past chrono's range cover all history
        let since = now
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let tickets = store.tickets_since(since)?;
        let history = store.successful_applications()?;
        let wins = SolutionWins::from_history(&history);

        info!(
            tickets = tickets.len(),
            window_days, "Analyzing ticket patterns"
        );

        let drafts = self.discover(&tickets, &wins);
        let mut summary = AnalysisSummary {
            tickets_analyzed: tickets.len(),
            ..Default::default()
        };

        for draft in &drafts {
            match store.upsert_pattern(draft, now)? {
                UpsertOutcome::Created(id) => {
                    summary.patterns_found += 1;
                    info!(
                        id,
                        kind = %draft.kind,
                        key = %draft.key,
                        confidence = draft.confidence,
                        solutions = draft.solution_ids.len(),
                        "New pattern"
                    );
                }
                UpsertOutcome::Refreshed(id) => {
                    summary.patterns_refreshed += 1;
                    debug!(id, kind = %draft.kind, key = %draft.key, "Pattern refreshed");
                }
            }
        }

        info!(
            tickets_analyzed = summary.tickets_analyzed,
            patterns_found = summary.patterns_found,
            patterns_refreshed = summary.patterns_refreshed,
            "Pattern analysis complete"
        );
        Ok(summary)
    }

    /// Every draft that clears both gates, without touching any store.
    /// Order: keyword, category, time, user.
    pub fn discover(&self, tickets: &[Ticket], wins: &SolutionWins) -> Vec<PatternDraft> {
        let analyzed: Vec<AnalyzedTicket<'_>> = tickets
            .iter()
            .map(|ticket| AnalyzedTicket {
                ticket,
                keywords: ticket.keywords(),
            })
            .collect();

        let mut drafts = self.keyword_patterns(&analyzed, wins);
        drafts.extend(self.category_patterns(&analyzed, wins));
        drafts.extend(self.time_patterns(&analyzed));
        drafts.extend(self.user_patterns(&analyzed, wins));
        drafts
    }

    fn passes(&self, group_size: usize, confidence: f64) -> bool {
        group_size >= self.settings.effective_min_occurrences()
            && confidence >= self.settings.min_confidence
    }

    fn keyword_patterns(
        &self,
        tickets: &[AnalyzedTicket<'_>],
        wins: &SolutionWins,
    ) -> Vec<PatternDraft> {
        let total = tickets.len();
        let mut groups: BTreeMap<&str, Vec<&AnalyzedTicket<'_>>> = BTreeMap::new();
        for t in tickets {
            for keyword in &t.keywords {
                groups.entry(keyword.as_str()).or_default().push(t);
            }
        }

        let mut drafts = Vec::new();
        for (keyword, group) in groups {
            let resolution_rate = resolved_fraction(&group);
            let confidence = (group.len() as f64 / total as f64 * 100.0 + resolution_rate * 30.0)
                .min(PATTERN_CONFIDENCE_CAP);
            if !self.passes(group.len(), confidence) {
                continue;
            }

            drafts.push(PatternDraft {
                kind: PatternKind::Keyword,
                key: keyword.to_string(),
                matching_keywords: vec![keyword.to_string()],
                category_id: None,
                confidence,
                times_matched: group.len() as u32,
                solution_ids: wins.common_to(group.iter().map(|t| t.ticket)),
                data: json!({
                    "keyword": keyword,
                    "ticket_count": group.len(),
                    "resolution_rate": resolution_rate,
                }),
            });
        }
        drafts
    }

    fn category_patterns(
        &self,
        tickets: &[AnalyzedTicket<'_>],
        wins: &SolutionWins,
    ) -> Vec<PatternDraft> {
        let mut groups: BTreeMap<CategoryId, (&str, Vec<&AnalyzedTicket<'_>>)> = BTreeMap::new();
        for t in tickets {
            if let Some(category) = &t.ticket.category {
                groups
                    .entry(category.id)
                    .or_insert_with(|| (category.name.as_str(), Vec::new()))
                    .1
                    .push(t);
            }
        }

        let mut drafts = Vec::new();
        for (category_id, (name, group)) in groups {
            if group.len() < self.settings.effective_min_occurrences() {
                continue;
            }

            let top_keywords = top_terms(
                group.iter().map(|t| &t.keywords),
                CATEGORY_TOP_KEYWORDS,
                MIN_TERM_TICKETS,
            );
            if top_keywords.is_empty() {
                debug!(category_id, "Category has no shared terms, skipped");
                continue;
            }

            let confidence = (resolved_fraction(&group) * 100.0).min(PATTERN_CONFIDENCE_CAP);
            if !self.passes(group.len(), confidence) {
                continue;
            }

            drafts.push(PatternDraft {
                kind: PatternKind::Category,
                key: category_id.to_string(),
                matching_keywords: top_keywords.clone(),
                category_id: Some(category_id),
                confidence,
                times_matched: group.len() as u32,
                solution_ids: wins.common_to(group.iter().map(|t| t.ticket)),
                data: json!({
                    "category_name": name,
                    "common_keywords": top_keywords,
                    "ticket_count": group.len(),
                }),
            });
        }
        drafts
    }

    fn time_patterns(&self, tickets: &[AnalyzedTicket<'_>]) -> Vec<PatternDraft> {
        // Monday = 0 keeps the output in calendar order
        let mut days: BTreeMap<u32, (String, Vec<&AnalyzedTicket<'_>>)> = BTreeMap::new();
        for t in tickets {
            let created = t.ticket.created_at;
            days.entry(created.weekday().num_days_from_monday())
                .or_insert_with(|| (created.format("%A").to_string(), Vec::new()))
                .1
                .push(t);
        }

        let daily_mean = tickets.len() as f64 / 7.0;
        let mut drafts = Vec::new();

        for (_, (day, day_tickets)) in days {
            if day_tickets.len() as f64 <= daily_mean * BUSY_DAY_FACTOR {
                continue;
            }

            let mut by_category: BTreeMap<CategoryId, (&str, usize)> = BTreeMap::new();
            for t in &day_tickets {
                if let Some(category) = &t.ticket.category {
                    by_category
                        .entry(category.id)
                        .or_insert_with(|| (category.name.as_str(), 0))
                        .1 += 1;
                }
            }

            for (category_id, (name, count)) in by_category {
                let confidence =
                    (count as f64 / day_tickets.len() as f64 * 100.0).min(PATTERN_CONFIDENCE_CAP);
                if !self.passes(count, confidence) {
                    continue;
                }

                drafts.push(PatternDraft {
                    kind: PatternKind::Time,
                    key: format!("{}_{}", day, name),
                    matching_keywords: Vec::new(),
                    category_id: None,
                    confidence,
                    times_matched: count as u32,
                    solution_ids: Vec::new(),
                    data: json!({
                        "day_of_week": day,
                        "category_id": category_id,
                        "category": name,
                        "occurrence_count": count,
                        "day_total": day_tickets.len(),
                    }),
                });
            }
        }
        drafts
    }

    fn user_patterns(
        &self,
        tickets: &[AnalyzedTicket<'_>],
        wins: &SolutionWins,
    ) -> Vec<PatternDraft> {
        let total = tickets.len();
        let mut users: BTreeMap<UserId, (&str, Vec<&AnalyzedTicket<'_>>)> = BTreeMap::new();
        for t in tickets {
            let creator = &t.ticket.created_by;
            users
                .entry(creator.id)
                .or_insert_with(|| (creator.username.as_str(), Vec::new()))
                .1
                .push(t);
        }
        if users.is_empty() {
            return Vec::new();
        }

        let per_user_mean = total as f64 / users.len() as f64;
        let floor = self.settings.effective_min_occurrences() as f64;
        let threshold = floor.max(per_user_mean * BUSY_USER_FACTOR);
        let mut drafts = Vec::new();

        for (user_id, (username, group)) in users {
            if (group.len() as f64) < threshold {
                continue;
            }

            let top_keywords = top_terms(
                group.iter().map(|t| &t.keywords),
                USER_TOP_KEYWORDS,
                MIN_TERM_TICKETS,
            );
            let Some(first) = top_keywords.first() else {
                continue;
            };

            let confidence =
                (group.len() as f64 / total as f64 * 100.0 + 30.0).min(USER_CONFIDENCE_CAP);
            if !self.passes(group.len(), confidence) {
                continue;
            }

            drafts.push(PatternDraft {
                kind: PatternKind::User,
                key: format!("user_{}_{}", user_id, first),
                matching_keywords: top_keywords.clone(),
                category_id: None,
                confidence,
                times_matched: group.len() as u32,
                solution_ids: wins.common_to(group.iter().map(|t| t.ticket)),
                data: json!({
                    "user_id": user_id,
                    "username": username,
                    "common_issues": top_keywords,
                    "ticket_count": group.len(),
                }),
            });
        }
        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Outcome, Solution, TicketSolution, TicketStatus, UserRef};
    use crate::store::MemoryStore;
    use crate::suggestion_engine::{SuggestionEngine, SuggestionMethod};
    use chrono::TimeZone;

    /// One distinct term per ticket
    const FILLER: [&str; 10] = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        "juliet",
    ];

    /// 2024-03-04 is a Monday
    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn hardware() -> Category {
        Category {
            id: 1,
            name: "Hardware".to_string(),
        }
    }

    fn user(id: i64) -> UserRef {
        UserRef {
            id,
            username: format!("user{}", id),
        }
    }

    fn ticket(
        id: i64,
        title: &str,
        category: Option<Category>,
        status: TicketStatus,
        created_by: UserRef,
        created_at: DateTime<Utc>,
    ) -> Ticket {
        Ticket {
            id,
            title: title.to_string(),
            description: String::new(),
            category,
            status,
            created_by,
            created_at,
            resolved_at: None,
            resolution: None,
        }
    }

    fn printer_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let titles = ["Printer won't print", "Printer is offline", "Printer paper jam"];
        for (i, title) in titles.iter().enumerate() {
            store.add_ticket(ticket(
                i as i64 + 1,
                title,
                Some(hardware()),
                TicketStatus::Open,
                user(i as i64 + 1),
                monday() + Duration::days(i as i64),
            ));
        }
        store
    }

    fn kinds(drafts: &[PatternDraft], kind: PatternKind) -> Vec<&PatternDraft> {
        drafts.iter().filter(|d| d.kind == kind).collect()
    }

    #[test]
    fn test_printer_keyword_pattern() {
        let mut store = printer_store();
        let analyzer = PatternAnalyzer::default();
        let now = monday() + Duration::days(5);

        let summary = analyzer.analyze(&mut store, 30, now).unwrap();
        assert_eq!(summary.tickets_analyzed, 3);
        assert_eq!(summary.patterns_found, 1);

        let patterns = store.patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        let printer = &patterns[0];
        assert_eq!(printer.kind, PatternKind::Keyword);
        assert_eq!(printer.key, "printer");
        // min(95, 100 * 3/3 + 30 * 0)
        assert_eq!(printer.confidence, 95.0);
        assert_eq!(printer.times_matched, 3);
        assert_eq!(printer.data["resolution_rate"], 0.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let mut store = printer_store();
        let analyzer = PatternAnalyzer::default();
        let now = monday() + Duration::days(5);

        let first = analyzer.analyze(&mut store, 30, now).unwrap();
        let count = store.patterns().unwrap().len();
        let second = analyzer.analyze(&mut store, 30, now + Duration::hours(1)).unwrap();

        assert_eq!(second.patterns_found, 0);
        assert_eq!(second.patterns_refreshed, first.patterns_found);
        assert_eq!(store.patterns().unwrap().len(), count);
        assert_eq!(store.patterns().unwrap()[0].last_seen, now + Duration::hours(1));
    }

    #[test]
    fn test_window_excludes_old_tickets() {
        let mut store = printer_store();
        let analyzer = PatternAnalyzer::default();
        let now = monday() + Duration::days(60);

        let summary = analyzer.analyze(&mut store, 30, now).unwrap();
        assert_eq!(summary.tickets_analyzed, 0);
        assert_eq!(summary.patterns_found, 0);
    }

    #[test]
    fn test_keyword_gate_on_low_share() {
        // "printer" in 3 of 10 tickets, none resolved: 30 < 70
        let mut tickets = Vec::new();
        for i in 0..10 {
            let title = if i < 3 { "Printer broken" } else { "Monitor flickers" };
            tickets.push(ticket(
                i,
                &format!("{} {}", title, FILLER[i as usize]),
                None,
                TicketStatus::Open,
                user(i),
                monday() + Duration::days(i % 7),
            ));
        }
        let drafts = PatternAnalyzer::default().discover(&tickets, &SolutionWins::default());
        let keyword = kinds(&drafts, PatternKind::Keyword);
        // "monitor" and "flickers" cover 7 of 10 tickets: exactly 70
        let keys: Vec<_> = keyword.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["flickers", "monitor"]);
    }

    #[test]
    fn test_keyword_solutions_need_two_wins() {
        let mut store = printer_store();
        let fix = Solution {
            id: 77,
            title: "Power cycle".to_string(),
            description: String::new(),
            steps: String::new(),
            category: Some(hardware()),
            keywords: String::new(),
            times_suggested: 3,
            times_successful: 2,
            is_active: true,
        };
        let once = Solution { id: 78, ..fix.clone() };
        store.add_solution(fix);
        store.add_solution(once);
        for (ticket_id, solution_id) in [(1, 77), (2, 77), (3, 78)] {
            store.record_application(TicketSolution {
                ticket_id,
                solution_id,
                outcome: Outcome::Succeeded,
                notes: String::new(),
                applied_at: monday(),
            });
        }

        PatternAnalyzer::default()
            .analyze(&mut store, 30, monday() + Duration::days(5))
            .unwrap();
        let patterns = store.patterns().unwrap();
        assert_eq!(patterns[0].solution_ids, vec![77]);
    }

    #[test]
    fn test_category_pattern_uses_shared_terms() {
        let now = monday() + Duration::days(6);
        let tickets: Vec<Ticket> = [
            "Laptop battery drains",
            "Laptop battery swollen",
            "Laptop fan noise",
            "Docking station dead",
        ]
        .iter()
        .enumerate()
        .map(|(i, title)| {
            ticket(
                i as i64,
                title,
                Some(hardware()),
                TicketStatus::Resolved,
                user(i as i64),
                now - Duration::days(i as i64),
            )
        })
        .collect();

        let drafts = PatternAnalyzer::default().discover(&tickets, &SolutionWins::default());
        let category = kinds(&drafts, PatternKind::Category);
        assert_eq!(category.len(), 1);
        assert_eq!(category[0].key, "1");
        assert_eq!(category[0].category_id, Some(1));
        assert_eq!(category[0].matching_keywords, vec!["laptop", "battery"]);
        assert_eq!(category[0].confidence, 95.0);
    }

    #[test]
    fn test_category_without_shared_terms_skipped() {
        let tickets: Vec<Ticket> = ["Keyboard sticky", "Mouse lagging", "Webcam blurry"]
            .iter()
            .enumerate()
            .map(|(i, title)| {
                ticket(
                    i as i64,
                    title,
                    Some(hardware()),
                    TicketStatus::Resolved,
                    user(i as i64),
                    monday() + Duration::days(i as i64),
                )
            })
            .collect();
        let drafts = PatternAnalyzer::default().discover(&tickets, &SolutionWins::default());
        assert!(kinds(&drafts, PatternKind::Category).is_empty());
    }

    #[test]
    fn test_time_pattern_on_busy_monday() {
        let mut tickets = Vec::new();
        for i in 0..4 {
            tickets.push(ticket(
                i,
                FILLER[i as usize],
                Some(hardware()),
                TicketStatus::Open,
                user(i),
                monday() + Duration::hours(i),
            ));
        }
        for i in 4..7 {
            tickets.push(ticket(
                i,
                FILLER[i as usize],
                None,
                TicketStatus::Open,
                user(i),
                monday() + Duration::days(i - 2),
            ));
        }

        let drafts = PatternAnalyzer::default().discover(&tickets, &SolutionWins::default());
        let time = kinds(&drafts, PatternKind::Time);
        assert_eq!(time.len(), 1);
        assert_eq!(time[0].key, "Monday_Hardware");
        assert_eq!(time[0].times_matched, 4);
        assert_eq!(time[0].confidence, 95.0);
        assert_eq!(time[0].data["day_of_week"], "Monday");
        assert_eq!(time[0].data["category_id"], 1);
        assert_eq!(time[0].category_id, None);
        assert!(time[0].solution_ids.is_empty());
    }

    #[test]
    fn test_time_pattern_gives_no_bonus_on_other_days() {
        let mut store = MemoryStore::new();
        for i in 0..4 {
            store.add_ticket(ticket(
                i,
                FILLER[i as usize],
                Some(hardware()),
                TicketStatus::Resolved,
                user(i),
                monday() + Duration::hours(i),
            ));
        }
        store.add_solution(Solution {
            id: 7,
            title: "Power cycle".to_string(),
            description: String::new(),
            steps: String::new(),
            category: None,
            keywords: String::new(),
            times_suggested: 2,
            times_successful: 2,
            is_active: true,
        });
        for ticket_id in [0, 1] {
            store.record_application(TicketSolution {
                ticket_id,
                solution_id: 7,
                outcome: Outcome::Succeeded,
                notes: String::new(),
                applied_at: monday(),
            });
        }

        PatternAnalyzer::default()
            .analyze(&mut store, 30, monday() + Duration::days(4))
            .unwrap();
        let patterns = store.patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].kind, PatternKind::Time);

        let friday = ticket(
            99,
            "xyz",
            Some(hardware()),
            TicketStatus::Open,
            user(9),
            monday() + Duration::days(4),
        );
        let suggestions = SuggestionEngine::default().suggest(&store, &friday).unwrap();
        assert!(suggestions
            .iter()
            .all(|s| s.method != SuggestionMethod::PatternMatch));
    }

    #[test]
    fn test_huge_window_covers_all_history() {
        let mut store = printer_store();
        let summary = PatternAnalyzer::default()
            .analyze(&mut store, u32::MAX, monday() + Duration::days(5))
            .unwrap();
        assert_eq!(summary.tickets_analyzed, 3);
        assert_eq!(summary.patterns_found, 1);
    }

    #[test]
    fn test_user_pattern_for_heavy_reporter() {
        let mut tickets = Vec::new();
        for i in 0..6 {
            tickets.push(ticket(
                i,
                &format!("Outlook crash {}", FILLER[i as usize]),
                None,
                TicketStatus::Open,
                user(1),
                monday() + Duration::days(i % 7),
            ));
        }
        for i in 6..10 {
            tickets.push(ticket(
                i,
                &format!("Misc {}", FILLER[i as usize]),
                None,
                TicketStatus::Open,
                user(i),
                monday() + Duration::days(i % 7),
            ));
        }

        let drafts = PatternAnalyzer::default().discover(&tickets, &SolutionWins::default());
        let users = kinds(&drafts, PatternKind::User);
        // mean 10/5 = 2, threshold max(3, 4) = 4; only user 1 qualifies
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].key, "user_1_crash");
        assert_eq!(users[0].matching_keywords, vec!["crash", "outlook"]);
        // min(90, 100 * 6/10 + 30)
        assert_eq!(users[0].confidence, 90.0);
    }

    #[test]
    fn test_empty_window() {
        let drafts = PatternAnalyzer::default().discover(&[], &SolutionWins::default());
        assert!(drafts.is_empty());
    }
}
