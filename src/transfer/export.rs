//! Export of the word list to a shareable JSON file
//!
//! File format: a pretty-printed JSON array of `{word, definition, tags,
//! isMarked}`. Ids are local only and are not exported.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::{Result, TransferError};
use crate::storage::write_atomic;
use crate::words::WordEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedWord {
    pub word: String,
    pub definition: String,
    pub tags: Vec<String>,
    pub is_marked: bool,
}

impl From<&WordEntry> for ExportedWord {
    fn from(entry: &WordEntry) -> Self {
        Self {
            word: entry.word.clone(),
            definition: entry.definition.clone(),
            tags: entry.tags.clone(),
            is_marked: entry.is_marked,
        }
    }
}

/// Serialize the list in export format
pub fn export_json(words: &[WordEntry]) -> Result<String> {
    if words.is_empty() {
        return Err(TransferError::NothingToExport);
    }
    let exported: Vec<ExportedWord> = words.iter().map(ExportedWord::from).collect();
    Ok(serde_json::to_string_pretty(&exported)?)
}

/// Timestamped file name, e.g. `words-05-03-2026-0930.json`
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("words-{}.json", now.format("%d-%m-%Y-%H%M"))
}

/// Write an export file into `dir` and return its path.
///
/// A failed write leaves no file under the final name.
pub fn write_export<Tz: TimeZone>(
    dir: &Path,
    words: &[WordEntry],
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let json = export_json(words)?;
    let path = dir.join(export_file_name(now));
    write_atomic(&path, &json)?;
    log::info!("Exported {} words to {:?}", words.len(), path);
    Ok(path)
}
