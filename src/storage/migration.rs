//! Upgrade of word lists written by earlier app versions.
//!
//! Early versions stored a random float as `id` and some omitted `isMarked`
//! (and occasionally `tags`). Entries whose id is not a UUID get a fresh one;
//! missing fields take their defaults.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::words::{WordEntry, WordId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWord {
    word: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    is_marked: Option<bool>,
}

/// Parse a stored word list, upgrading legacy entries.
///
/// Returns the entries and how many of them needed an upgrade.
pub fn upgrade_stored_words(content: &str) -> serde_json::Result<(Vec<WordEntry>, usize)> {
    let stored: Vec<StoredWord> = serde_json::from_str(content)?;
    let mut upgraded = 0;

    let words = stored
        .into_iter()
        .map(|s| {
            let parsed_id = s
                .id
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|raw| Uuid::parse_str(raw).ok());

            if parsed_id.is_none() || s.is_marked.is_none() {
                upgraded += 1;
            }

            WordEntry {
                word: s.word,
                definition: s.definition,
                tags: s.tags,
                id: parsed_id.map(WordId::from).unwrap_or_default(),
                is_marked: s.is_marked.unwrap_or(false),
            }
        })
        .collect();

    Ok((words, upgraded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_format_needs_no_upgrade() {
        let entry = WordEntry::new("cat".into(), "feline".into(), vec!["x".into()]);
        let json = serde_json::to_string(&vec![entry.clone()]).unwrap();

        let (words, upgraded) = upgrade_stored_words(&json).unwrap();
        assert_eq!(upgraded, 0);
        assert_eq!(words, vec![entry]);
    }

    #[test]
    fn test_float_ids_are_replaced() {
        let json = r#"[
            {"word":"cat","definition":"feline","tags":["y"],"id":0.8123},
            {"word":"dog","definition":"canine","tags":[],"id":0.1234,"isMarked":true}
        ]"#;

        let (words, upgraded) = upgrade_stored_words(json).unwrap();
        assert_eq!(upgraded, 2);
        assert_eq!(words.len(), 2);
        assert_ne!(words[0].id, words[1].id);
        assert!(!words[0].is_marked);
        assert!(words[1].is_marked);
        assert_eq!(words[0].tags, vec!["y"]);
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let id = WordId::new();
        let json = format!(
            r#"[{{"word":"cat","definition":"feline","id":"{}","isMarked":false}}]"#,
            id
        );

        let (words, upgraded) = upgrade_stored_words(&json).unwrap();
        assert_eq!(upgraded, 0);
        assert_eq!(words[0].id, id);
        assert!(words[0].tags.is_empty());
    }

    #[test]
    fn test_not_an_array_is_rejected() {
        assert!(upgrade_stored_words(r#"{"word":"cat"}"#).is_err());
    }
}
