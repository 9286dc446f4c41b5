//! Keyword Extractor
//!
//! Turns free ticket/solution text into a set of salient lowercase terms.
//! Shared by the suggestion engine and the pattern analyzer so both agree
//! on what counts as "the same word".
//!
//! Rules:
//! - word-bounded ASCII alphabetic runs of 3+ letters (`abc123` is dropped)
//! - lowercased
//! - stop words removed
//! - duplicates collapse (set semantics, frequency is discarded)

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Minimum token length kept by the extractor
pub const MIN_TERM_LEN: usize = 3;

/// English function words, pronouns and apostrophe-less contractions
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "can", "cannot", "cant", "wont", "dont", "doesnt", "didnt",
    "isnt", "arent", "wasnt", "werent", "hasnt", "havent", "hadnt", "i", "you", "he", "she",
    "it", "we", "they", "me", "him", "her", "us", "them",
];

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("keyword pattern is valid"))
}

/// Whether a (lowercase) term is on the stop list
pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}

/// Extract the unique salient terms of `text`
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Terms present in both sets, in sorted order
pub fn common_terms(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}

/// |a ∩ b| / max(|a|, |b|), 0.0 when both sets are empty
pub fn overlap_ratio(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let denom = a.len().max(b.len());
    if denom == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / denom as f64
}

/// Rank terms by how many of `sets` contain them.
///
/// Keeps terms found in at least `min_count` sets, orders by count desc and
/// then alphabetically, and returns at most `limit` terms.
pub fn top_terms<'a, I>(sets: I, limit: usize, min_count: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a BTreeSet<String>>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for set in sets {
        for term in set {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Split a comma-separated keyword field into trimmed lowercase terms
pub fn parse_keyword_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}
