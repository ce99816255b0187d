use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::migration::upgrade_stored_words;
use super::models::Settings;
use crate::words::WordEntry;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

const WORDS_FILE: &str = "words.json";
const SETTINGS_FILE: &str = "settings.json";
const REMINDERS_FILE: &str = "reminders.json";

/// Durable local storage: one JSON blob for the word list, one for settings
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashword"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn words_path(&self) -> PathBuf {
        self.base_path.join(WORDS_FILE)
    }

    fn settings_path(&self) -> PathBuf {
        self.base_path.join(SETTINGS_FILE)
    }

    /// Path of the scheduled-reminder outbox
    pub fn reminders_path(&self) -> PathBuf {
        self.base_path.join(REMINDERS_FILE)
    }

    // ===== Word list =====

    /// Read the canonical word list.
    ///
    /// A missing file is an empty list. Files written by older versions are
    /// upgraded in place.
    pub fn load_words(&self) -> Result<Vec<WordEntry>> {
        let path = self.words_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let (words, upgraded) = upgrade_stored_words(&content)?;
        if upgraded > 0 {
            log::info!("Upgraded {} legacy word entries in {:?}", upgraded, path);
            self.save_words(&words)?;
        }

        log::debug!("Loaded {} words from {:?}", words.len(), path);
        Ok(words)
    }

    /// Rewrite the whole word list
    pub fn save_words(&self, words: &[WordEntry]) -> Result<()> {
        self.init()?;
        let json = serde_json::to_string(words)?;
        write_atomic(&self.words_path(), &json)?;
        Ok(())
    }

    // ===== Settings =====

    pub fn load_settings(&self) -> Result<Settings> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.init()?;
        let json = serde_json::to_string_pretty(settings)?;
        write_atomic(&self.settings_path(), &json)?;
        Ok(())
    }
}

/// Write a file through a temporary sibling and a rename.
///
/// Readers see either the old or the new content, never a partial file.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));
        storage.init().unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_missing_words_file_is_empty_list() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.load_words().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_words() {
        let (storage, _temp) = create_test_storage();
        let words = vec![
            WordEntry::new("cat".into(), "feline".into(), vec!["animal".into()]),
            WordEntry::new("dog".into(), "canine".into(), Vec::new()),
        ];
        storage.save_words(&words).unwrap();

        let loaded = storage.load_words().unwrap();
        assert_eq!(loaded, words);
        assert!(!storage.base_path().join("words.json.tmp").exists());
    }

    #[test]
    fn test_settings_default_when_missing() {
        let (storage, _temp) = create_test_storage();
        let settings = storage.load_settings().unwrap();
        assert_eq!(settings.reminders.start_hour, 9);
        assert_eq!(settings.reminders.end_hour, 21);
        assert_eq!(settings.reminders.interval_minutes, 40);
    }

    #[test]
    fn test_save_and_load_settings() {
        let (storage, _temp) = create_test_storage();
        let mut settings = Settings::default();
        settings.reminders.interval_minutes = 90;
        settings.notifications_enabled = false;
        storage.save_settings(&settings).unwrap();

        let loaded = storage.load_settings().unwrap();
        assert_eq!(loaded.reminders.interval_minutes, 90);
        assert!(!loaded.notifications_enabled);
    }

    #[test]
    fn test_corrupt_words_file_is_an_error() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.base_path().join("words.json"), "{not json").unwrap();
        assert!(matches!(storage.load_words(), Err(StorageError::Json(_))));
    }
}
