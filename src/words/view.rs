//! Displayed-list projections over the canonical word list
//!
//! The displayed list is never persisted. It is a list of ids derived from
//! the canonical list by one of the view modes below.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::models::{WordEntry, WordId};

/// Sort orders offered by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Date added, oldest first (insertion order)
    DateAsc,
    /// Date added, newest first
    DateDesc,
    /// Shuffled once when selected
    Random,
    /// Bookmarked words only, insertion order
    Marked,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::DateAsc
    }
}

/// The projection currently applied to the displayed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Sorted(SortOrder),
    /// Lower-cased tags; a word is shown if it carries any of them
    Tagged(Vec<String>),
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Sorted(SortOrder::DateAsc)
    }
}

/// Normalize a comma-separated tag query: trim, lower-case, drop empties
pub fn parse_tag_query(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Project the canonical list through a view mode
pub fn project<R: Rng + ?Sized>(
    words: &[WordEntry],
    mode: &ViewMode,
    rng: &mut R,
) -> Vec<WordId> {
    match mode {
        ViewMode::Sorted(SortOrder::DateAsc) => words.iter().map(|w| w.id).collect(),
        ViewMode::Sorted(SortOrder::DateDesc) => words.iter().rev().map(|w| w.id).collect(),
        ViewMode::Sorted(SortOrder::Random) => {
            let mut ids: Vec<WordId> = words.iter().map(|w| w.id).collect();
            ids.shuffle(rng);
            ids
        }
        ViewMode::Sorted(SortOrder::Marked) => words
            .iter()
            .filter(|w| w.is_marked)
            .map(|w| w.id)
            .collect(),
        ViewMode::Tagged(tags) => words
            .iter()
            .filter(|w| w.has_any_tag(tags))
            .map(|w| w.id)
            .collect(),
    }
}

/// All tags in use, lower-cased and de-duplicated in first-seen order
pub fn unique_tags(words: &[WordEntry]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in words.iter().flat_map(|w| w.tags.iter()) {
        let lower = tag.to_lowercase();
        if !tags.contains(&lower) {
            tags.push(lower);
        }
    }
    tags
}
