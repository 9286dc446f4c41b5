//! Output formatting - plain terminal text for each command
//!
//! Renderers return strings so tests can inspect them; handlers print.

use helpdesk_common::fixtures::ImportCounts;
use helpdesk_common::{AnalysisSummary, Pattern, Solution, Suggestion, Ticket};
use owo_colors::OwoColorize;
use std::fmt::Write;

pub const HR: &str = "----------------------------------------------------------------";

/// Green at 0.8+, yellow at 0.5+, red below
fn colored_confidence(confidence: f64) -> String {
    let text = format!("{:>3.0}%", confidence * 100.0);
    if confidence >= 0.8 {
        text.bright_green().to_string()
    } else if confidence >= 0.5 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}

pub fn render_suggestions(ticket: &Ticket, suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} #{} {}", "Ticket".bold(), ticket.id, ticket.title);
    if let Some(category) = &ticket.category {
        let _ = writeln!(out, "  category: {}", category.name);
    }
    let _ = writeln!(out, "  status:   {}", ticket.status);
    let _ = writeln!(out, "{}", HR.dimmed());

    if suggestions.is_empty() {
        let _ = writeln!(out, "No suggestions.");
        return out;
    }

    for (rank, suggestion) in suggestions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} [{}] {}",
            rank + 1,
            colored_confidence(suggestion.confidence),
            suggestion.method,
            suggestion.solution.title
        );
        let _ = writeln!(out, "      {}", suggestion.reason.dimmed());
    }
    out
}

pub fn render_summary(summary: &AnalysisSummary) -> String {
    format!(
        "Tickets analyzed: {}\nPatterns found:   {}\nPatterns refreshed: {}\n",
        summary.tickets_analyzed, summary.patterns_found, summary.patterns_refreshed
    )
}

pub fn render_patterns(patterns: &[Pattern]) -> String {
    if patterns.is_empty() {
        return "No patterns.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<8}  {:<28}  {:>5}  {:>5}  {}",
        "ID", "KIND", "KEY", "CONF", "SEEN", "SOLUTIONS"
    );
    let _ = writeln!(out, "{}", HR.dimmed());
    for p in patterns {
        let solutions = if p.solution_ids.is_empty() {
            "-".to_string()
        } else {
            p.solution_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<8}  {:<28}  {:>5.1}  {:>5}  {}",
            p.id,
            p.kind.as_str(),
            p.key,
            p.confidence,
            p.times_matched,
            solutions
        );
    }
    out
}

pub fn render_top_solutions(solutions: &[Solution]) -> String {
    if solutions.is_empty() {
        return "No solutions with enough suggestions yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:>6}  {:>9}  {}", "ID", "RATE", "WINS/USES", "TITLE");
    let _ = writeln!(out, "{}", HR.dimmed());
    for s in solutions {
        let _ = writeln!(
            out,
            "{:>4}  {:>5.1}%  {:>4}/{:<4}  {}",
            s.id,
            s.success_rate(),
            s.times_successful,
            s.times_suggested,
            s.title
        );
    }
    out
}

pub fn render_import(counts: &ImportCounts) -> String {
    format!(
        "Imported {} categories, {} users, {} solutions, {} tickets, {} applications\n",
        counts.categories, counts.users, counts.solutions, counts.tickets, counts.applications
    )
}
