//! Import of exported word files
//!
//! Incoming records are merged into the list by exact `word` match
//! (case-sensitive, untrimmed). On a match the tags are unioned and the
//! existing definition wins; otherwise the record is appended as a new,
//! unmarked entry. Entries already in the list that share a word are
//! folded together first.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Result, TransferError};
use crate::words::{union_tags, WordEntry};

/// One record of an import file. Extra fields such as `isMarked` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportedWord {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Counts reported after a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Records appended as new entries
    pub added: usize,
    /// Records folded into an existing entry
    pub merged: usize,
    /// Existing entries folded into an earlier entry with the same word
    pub collapsed: usize,
}

/// Parse import file content. Anything but an array of records is rejected.
pub fn parse_import(content: &str) -> Result<Vec<ImportedWord>> {
    serde_json::from_str(content).map_err(TransferError::InvalidFormat)
}

/// Read and parse an import file
pub fn read_import_file(path: &Path) -> Result<Vec<ImportedWord>> {
    let content = fs::read_to_string(path)?;
    parse_import(&content)
}

/// Merge incoming records into a copy of `existing`, in input order.
///
/// Entries of `existing` that repeat an earlier word are folded into that
/// first entry (its id, definition and bookmark stay, tags are unioned).
/// Later records in the same batch also merge into entries appended by
/// earlier ones, so the result never holds two entries with the same word.
pub fn merge_words(
    existing: &[WordEntry],
    incoming: &[ImportedWord],
) -> (Vec<WordEntry>, MergeSummary) {
    let mut merged: Vec<WordEntry> = Vec::with_capacity(existing.len() + incoming.len());
    let mut summary = MergeSummary::default();

    for entry in existing {
        match merged.iter_mut().find(|w| w.word == entry.word) {
            Some(first) => {
                first.tags = union_tags(&first.tags, &entry.tags);
                summary.collapsed += 1;
            }
            None => merged.push(entry.clone()),
        }
    }

    for record in incoming {
        match merged.iter_mut().find(|w| w.word == record.word) {
            Some(entry) => {
                entry.tags = union_tags(&entry.tags, &record.tags);
                summary.merged += 1;
            }
            None => {
                merged.push(WordEntry::new(
                    record.word.clone(),
                    record.definition.clone(),
                    union_tags(&[], &record.tags),
                ));
                summary.added += 1;
            }
        }
    }

    (merged, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn record(word: &str, definition: &str, tags: &[&str]) -> ImportedWord {
        ImportedWord {
            word: word.to_string(),
            definition: definition.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_import_tags_optional() {
        let parsed = parse_import(r#"[{"word":"cat","definition":"feline"}]"#).unwrap();
        assert_eq!(parsed, vec![record("cat", "feline", &[])]);
    }

    #[test]
    fn test_parse_import_ignores_bookmark_field() {
        let content = r#"[{"word":"cat","definition":"feline","tags":["x"],"isMarked":true}]"#;
        let parsed = parse_import(content).unwrap();
        assert_eq!(parsed, vec![record("cat", "feline", &["x"])]);
    }

    #[test]
    fn test_parse_import_rejects_malformed() {
        assert!(matches!(parse_import("not json"), Err(TransferError::InvalidFormat(_))));
        assert!(matches!(
            parse_import(r#"{"word":"cat"}"#),
            Err(TransferError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_import(r#"[{"definition":"x"}]"#),
            Err(TransferError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_import_file_missing_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_import_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(TransferError::Io(_))));
    }

    #[test]
    fn test_collision_keeps_definition_and_unions_tags() {
        let mut cat = WordEntry::new("cat".into(), "old-def".into(), vec!["y".into()]);
        cat.is_marked = true;
        let existing = vec![cat.clone()];

        let (merged, summary) = merge_words(&existing, &[record("cat", "new-def", &["x"])]);

        assert_eq!(summary, MergeSummary { added: 0, merged: 1, collapsed: 0 });
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].definition, "old-def");
        assert_eq!(merged[0].id, cat.id);
        assert!(merged[0].is_marked);
        let tags: HashSet<&str> = merged[0].tags.iter().map(String::as_str).collect();
        assert_eq!(tags, HashSet::from(["x", "y"]));
    }

    #[test]
    fn test_word_match_is_case_sensitive() {
        let existing = vec![WordEntry::new("Cat".into(), "feline".into(), Vec::new())];
        let batch = [record("cat", "feline", &[]), record("Cat ", "x", &[])];
        let (merged, summary) = merge_words(&existing, &batch);
        assert_eq!(summary.added, 2);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_new_records_are_unmarked_with_fresh_ids() {
        let batch = [record("cat", "feline", &["a"]), record("dog", "canine", &[])];
        let (merged, _) = merge_words(&[], &batch);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|w| !w.is_marked));
        assert_ne!(merged[0].id, merged[1].id);
    }

    #[test]
    fn test_duplicates_within_one_batch_collapse() {
        let batch = [record("cat", "first", &["a"]), record("cat", "second", &["b"])];
        let (merged, summary) = merge_words(&[], &batch);
        assert_eq!(summary, MergeSummary { added: 1, merged: 1, collapsed: 0 });
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].definition, "first");
        assert_eq!(merged[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn test_existing_duplicates_collapse_into_first_entry() {
        let mut first = WordEntry::new("cat".into(), "a".into(), vec!["y".into()]);
        first.is_marked = true;
        let second = WordEntry::new("cat".into(), "b".into(), vec!["z".into()]);
        let dog = WordEntry::new("dog".into(), "canine".into(), Vec::new());
        let existing = vec![first.clone(), dog.clone(), second];

        let (merged, summary) = merge_words(&existing, &[record("cat", "c", &["x"])]);

        assert_eq!(summary, MergeSummary { added: 0, merged: 1, collapsed: 1 });
        let cats: Vec<&WordEntry> = merged.iter().filter(|w| w.word == "cat").collect();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].id, first.id);
        assert_eq!(cats[0].definition, "a");
        assert!(cats[0].is_marked);
        assert_eq!(cats[0].tags, vec!["y", "z", "x"]);
        assert_eq!(merged.iter().map(|w| w.id).collect::<Vec<_>>(), vec![first.id, dog.id]);
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let batch = vec![record("cat", "feline", &["a", "b"]), record("dog", "canine", &["c"])];
        let (once, _) = merge_words(&[], &batch);
        let (twice, summary) = merge_words(&once, &batch);

        assert_eq!(summary.added, 0);
        assert_eq!(twice.len(), once.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.word, b.word);
            assert_eq!(a.tags, b.tags);
            assert_eq!(a.id, b.id);
        }
    }
}
