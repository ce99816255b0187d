//! Data models for the word list

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a word entry.
///
/// Only used for local list identity (selection, deletion, scroll target
/// and notification deep links). Not portable: exports drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(Uuid);

impl WordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for WordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One flashcard: the word on the front, its definition on the back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,
    pub definition: String,
    /// Stored as entered, compared case-insensitively
    #[serde(default)]
    pub tags: Vec<String>,
    pub id: WordId,
    #[serde(default)]
    pub is_marked: bool,
}

impl WordEntry {
    pub fn new(word: String, definition: String, tags: Vec<String>) -> Self {
        Self {
            word,
            definition,
            tags,
            id: WordId::new(),
            is_marked: false,
        }
    }

    /// Check whether any tag matches one of the (already lower-cased) query tags
    pub fn has_any_tag(&self, query: &[String]) -> bool {
        self.tags
            .iter()
            .any(|tag| query.contains(&tag.to_lowercase()))
    }
}

/// Split raw tag input on commas, trimming and dropping empty pieces.
///
/// Case is preserved; tags are compared case-insensitively later on.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Union of two tag lists with exact-string de-duplication.
///
/// Order is first-seen: existing tags first, then new incoming ones.
pub fn union_tags(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + incoming.len());
    for tag in existing.iter().chain(incoming.iter()) {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}
