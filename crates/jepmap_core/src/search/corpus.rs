//! Substring search with word-trimmed context snippets.
//!
//! # Invariants
//! - Queries shorter than the configured minimum are rejected with an empty
//!   result, never an error.
//! - Results follow the order of the indexed JEPs; there is no relevance
//!   ranking.
//! - A matching JEP is reported even when none of its snippets survive.
//! - Text is handled per character, so snippets never split a code point.

use crate::config::SearchConfig;
use crate::model::item::{Item, ItemNumber};
use crate::repo::entity_store::EntityStore;
use log::debug;

/// Normalized search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    /// Trims and case-folds `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: fold_case(text.trim()).into_iter().collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One matching JEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub number: ItemNumber,
    pub name: String,
    /// Word-trimmed body excerpts, one per surviving occurrence.
    pub snippets: Vec<String>,
}

#[derive(Debug, Clone)]
struct IndexedItem {
    number: ItemNumber,
    name: String,
    folded_name: String,
    body: Vec<char>,
    folded_body: Vec<char>,
}

/// Read-only search snapshot of JEPs.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    entries: Vec<IndexedItem>,
    config: SearchConfig,
}

impl CorpusIndex {
    /// Builds an index keeping the order of `items`.
    pub fn new(items: Vec<Item>, config: SearchConfig) -> Self {
        let entries = items
            .iter()
            .map(|item| {
                let body: Vec<char> = item.body.as_deref().unwrap_or("").chars().collect();
                let folded_body = body.iter().map(|&c| fold_char(c)).collect();
                IndexedItem {
                    number: item.number(),
                    name: item.name().to_string(),
                    folded_name: fold_case(item.name()).into_iter().collect(),
                    body,
                    folded_body,
                }
            })
            .collect::<Vec<_>>();

        Self { entries, config }
    }

    /// Builds an index from every JEP in a finished store, ascending by number.
    pub fn from_store(store: &EntityStore, config: SearchConfig) -> Self {
        Self::new(store.items().cloned().collect(), config)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every JEP whose name or body contains `query`.
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        if query.char_len() < self.config.min_query_chars {
            debug!(
                "event=search_rejected module=search status=skip query_chars={} min_chars={}",
                query.char_len(),
                self.config.min_query_chars
            );
            return Vec::new();
        }

        let needle: Vec<char> = query.as_str().chars().collect();
        let hits = self
            .entries
            .iter()
            .filter(|entry| {
                entry.folded_name.contains(query.as_str())
                    || find_from(&entry.folded_body, &needle, 0).is_some()
            })
            .map(|entry| SearchHit {
                number: entry.number,
                name: entry.name.clone(),
                snippets: snippets_in(
                    &entry.body,
                    &entry.folded_body,
                    &needle,
                    self.config.context_radius,
                ),
            })
            .collect::<Vec<_>>();

        debug!(
            "event=search_done module=search status=ok query_chars={} hits={}",
            query.char_len(),
            hits.len()
        );
        hits
    }
}

/// Extracts word-trimmed snippets around each occurrence of `query` in `body`.
///
/// After a hit the scan resumes `radius` characters later. The window
/// `[pos - radius, pos + radius)` is cut to the text between its first and
/// last space; windows with fewer than two spaces are skipped.
pub fn extract_snippets(body: &str, query: &str, radius: usize) -> Vec<String> {
    let needle = fold_case(query);
    let body: Vec<char> = body.chars().collect();
    let folded: Vec<char> = body.iter().map(|&c| fold_char(c)).collect();
    snippets_in(&body, &folded, &needle, radius)
}

fn snippets_in(body: &[char], folded: &[char], needle: &[char], radius: usize) -> Vec<String> {
    let mut snippets = Vec::new();
    if needle.is_empty() {
        return snippets;
    }

    let mut from = 0;
    while let Some(pos) = find_from(folded, needle, from) {
        let start = pos.saturating_sub(radius);
        let end = (pos + radius).min(body.len());
        let window = &body[start..end];

        let first_space = window.iter().position(|&c| c == ' ');
        let last_space = window.iter().rposition(|&c| c == ' ');
        match (first_space, last_space) {
            (Some(first), Some(last)) if first < last => {
                snippets.push(window[first + 1..last].iter().collect());
            }
            _ => debug!("event=snippet_skipped module=search status=skip position={pos}"),
        }

        from = pos + radius.max(1);
    }

    snippets
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| offset + from)
}

/// Lowercases per character, keeping characters whose lowercase form is not
/// a single character; folded text stays index-aligned with the original.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}
