//! Suggestion Engine - ranked solution candidates for one ticket
//!
//! Four independent strategies feed one candidate list:
//!
//! 1. Category match: active solutions in the ticket's category
//! 2. Keyword match: term overlap between ticket and solution text
//! 3. Pattern match: analyzer patterns whose terms or category fit the ticket
//! 4. Historical match: solutions that worked on similar past tickets
//!
//! Merge: one entry per solution (highest confidence wins, earlier entry on a
//! tie), sorted by confidence descending, truncated to `max_results`.
//!
//! Read-only. Counters on solutions are never touched here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::config::SuggestionSettings;
use crate::error::Result;
use crate::keywords::{common_terms, overlap_ratio};
use crate::models::{AppliedSolution, CategoryId, Pattern, Solution, SolutionId, Ticket};
use crate::store::{PatternStore, TicketStore};

/// Cap for keyword and pattern confidences
const KEYWORD_CONFIDENCE_CAP: f64 = 0.95;

/// Cap for historical confidences
const HISTORICAL_CONFIDENCE_CAP: f64 = 0.85;

/// Shared terms needed before a past ticket counts as similar
const MIN_HISTORICAL_OVERLAP: usize = 2;

/// Which strategy produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMethod {
    CategoryMatch,
    KeywordMatch,
    PatternMatch,
    HistoricalMatch,
}

impl SuggestionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionMethod::CategoryMatch => "category_match",
            SuggestionMethod::KeywordMatch => "keyword_match",
            SuggestionMethod::PatternMatch => "pattern_match",
            SuggestionMethod::HistoricalMatch => "historical_match",
        }
    }
}

impl std::fmt::Display for SuggestionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked candidate
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub solution: Solution,
    /// Heuristic confidence in [0, 1]
    pub confidence: f64,
    pub reason: String,
    pub method: SuggestionMethod,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    settings: SuggestionSettings,
}

impl SuggestionEngine {
    pub fn new(settings: SuggestionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SuggestionSettings {
        &self.settings
    }

    /// Ranked suggestions for `ticket`; empty when nothing matches
    pub fn suggest<S>(&self, store: &S, ticket: &Ticket) -> Result<Vec<Suggestion>>
    where
        S: TicketStore + PatternStore,
    {
        let ticket_keywords = ticket.keywords();
        let solutions = store.active_solutions()?;

        let by_category = self.category_matches(ticket, &solutions);
        let by_keyword = self.keyword_matches(&ticket_keywords, &solutions);

        let patterns =
            store.active_patterns(self.settings.effective_pattern_min_confidence())?;
        let by_pattern =
            self.pattern_matches(&ticket_keywords, ticket.category_id(), &patterns, &solutions);

        let history = store.successful_applications()?;
        let by_history = self.historical_matches(&ticket_keywords, &history);

        debug!(
            ticket_id = ticket.id,
            keywords = ticket_keywords.len(),
            category = by_category.len(),
            keyword = by_keyword.len(),
            pattern = by_pattern.len(),
            historical = by_history.len(),
            "Suggestion candidates"
        );

        let mut candidates = by_category;
        candidates.extend(by_keyword);
        candidates.extend(by_pattern);
        candidates.extend(by_history);

        let mut merged = dedupe_by_solution(candidates);
        sort_by_confidence(&mut merged);
        merged.truncate(self.settings.effective_max_results());
        Ok(merged)
    }

    /// Strategy 1: same category, best track record first
    pub fn category_matches(&self, ticket: &Ticket, solutions: &[Solution]) -> Vec<Suggestion> {
        let Some(category) = &ticket.category else {
            return Vec::new();
        };

        let mut same: Vec<&Solution> = solutions
            .iter()
            .filter(|s| s.category_id() == Some(category.id))
            .collect();
        same.sort_by(|a, b| {
            b.times_successful
                .cmp(&a.times_successful)
                .then(b.times_suggested.cmp(&a.times_suggested))
                .then(a.id.cmp(&b.id))
        });

        same.into_iter()
            .take(self.settings.category_limit)
            .map(|solution| Suggestion {
                solution: solution.clone(),
                confidence: 0.7 + solution.success_rate() / 100.0 * 0.3,
                reason: format!("Same category: {}", category.name),
                method: SuggestionMethod::CategoryMatch,
            })
            .collect()
    }

    /// Strategy 2: keyword overlap blended with success rate
    pub fn keyword_matches(
        &self,
        ticket_keywords: &BTreeSet<String>,
        solutions: &[Solution],
    ) -> Vec<Suggestion> {
        let mut matches = Vec::new();

        for solution in solutions {
            let solution_terms = solution.search_terms();
            let common = common_terms(ticket_keywords, &solution_terms);
            if common.is_empty() {
                continue;
            }

            let ratio = overlap_ratio(ticket_keywords, &solution_terms);
            let success_bonus = solution.success_rate() / 100.0 * 0.3;
            matches.push(Suggestion {
                solution: solution.clone(),
                confidence: (ratio * 0.7 + success_bonus).min(KEYWORD_CONFIDENCE_CAP),
                reason: format!("Keyword match: {}", common.join(", ")),
                method: SuggestionMethod::KeywordMatch,
            });
        }

        sort_by_confidence(&mut matches);
        matches.truncate(self.settings.keyword_limit);
        matches
    }

    /// Strategy 3: solutions attached to patterns that fit the ticket
    pub fn pattern_matches(
        &self,
        ticket_keywords: &BTreeSet<String>,
        ticket_category: Option<CategoryId>,
        patterns: &[Pattern],
        solutions: &[Solution],
    ) -> Vec<Suggestion> {
        let floor = self.settings.effective_pattern_min_confidence();
        let by_id: HashMap<SolutionId, &Solution> =
            solutions.iter().map(|s| (s.id, s)).collect();
        let mut matches = Vec::new();

        for pattern in patterns.iter().filter(|p| p.is_active && p.confidence >= floor) {
            let keyword_hit = pattern
                .matching_keywords
                .iter()
                .any(|kw| ticket_keywords.contains(&kw.trim().to_lowercase()));
            let category_hit =
                pattern.category_id.is_some() && pattern.category_id == ticket_category;

            if !keyword_hit && !category_hit {
                continue;
            }

            let mut confidence = pattern.confidence / 100.0 * 0.8;
            if category_hit {
                confidence += 0.2;
            }
            let confidence = confidence.min(KEYWORD_CONFIDENCE_CAP);

            for solution_id in &pattern.solution_ids {
                match by_id.get(solution_id) {
                    Some(solution) => matches.push(Suggestion {
                        solution: (*solution).clone(),
                        confidence,
                        reason: format!("Pattern match: {}", pattern.kind),
                        method: SuggestionMethod::PatternMatch,
                    }),
                    None => debug!(
                        pattern_id = pattern.id,
                        solution_id, "Pattern links an inactive or missing solution"
                    ),
                }
            }
        }

        sort_by_confidence(&mut matches);
        matches.truncate(self.settings.pattern_limit);
        matches
    }

    /// Strategy 4: solutions that succeeded on tickets sharing 2+ terms.
    ///
    /// Applications whose solution has since been deactivated are skipped,
    /// so a retired fix is never offered again through its history.
    pub fn historical_matches(
        &self,
        ticket_keywords: &BTreeSet<String>,
        history: &[AppliedSolution],
    ) -> Vec<Suggestion> {
        let mut matches = Vec::new();

        for applied in history.iter().filter(|a| a.solution.is_active) {
            let past_keywords = applied.ticket.keywords();
            let common = common_terms(ticket_keywords, &past_keywords);
            if common.len() < MIN_HISTORICAL_OVERLAP {
                continue;
            }

            let ratio = overlap_ratio(ticket_keywords, &past_keywords);
            matches.push(Suggestion {
                solution: applied.solution.clone(),
                confidence: (ratio * 0.6 + 0.2).min(HISTORICAL_CONFIDENCE_CAP),
                reason: format!(
                    "Historical success: Similar to ticket #{}",
                    applied.ticket.id
                ),
                method: SuggestionMethod::HistoricalMatch,
            });
        }

        let mut unique = dedupe_by_solution(matches);
        sort_by_confidence(&mut unique);
        unique.truncate(self.settings.historical_limit);
        unique
    }
}

/// Active solutions tried at least `min_suggested` times, best success rate first
pub fn top_solutions<S: TicketStore>(
    store: &S,
    min_suggested: u32,
    limit: usize,
) -> Result<Vec<Solution>> {
    let mut solutions: Vec<Solution> = store
        .active_solutions()?
        .into_iter()
        .filter(|s| s.times_suggested >= min_suggested)
        .collect();
    solutions.sort_by(|a, b| {
        b.success_rate()
            .total_cmp(&a.success_rate())
            .then(b.times_successful.cmp(&a.times_successful))
            .then(a.id.cmp(&b.id))
    });
    solutions.truncate(limit);
    Ok(solutions)
}

/// Keep one suggestion per solution: the highest confidence, first on ties.
/// Order of first appearance is preserved.
fn dedupe_by_solution(candidates: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut slots: HashMap<SolutionId, usize> = HashMap::new();
    let mut unique: Vec<Suggestion> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match slots.get(&candidate.solution.id) {
            Some(&idx) => {
                if candidate.confidence > unique[idx].confidence {
                    unique[idx] = candidate;
                }
            }
            None => {
                slots.insert(candidate.solution.id, unique.len());
                unique.push(candidate);
            }
        }
    }
    unique
}

/// Stable sort, highest confidence first
fn sort_by_confidence(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
