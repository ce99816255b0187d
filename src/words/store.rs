//! The canonical word list and its displayed projection
//!
//! `WordStore` is the single writer of the word list. Every mutation updates
//! the in-memory list first and then hands a snapshot to the flusher without
//! waiting for the write.

use thiserror::Error;

use super::models::{WordEntry, WordId};
use super::view::{parse_tag_query, project, unique_tags, SortOrder, ViewMode};
use crate::storage::FlushHandle;
use crate::transfer::{merge_words, ImportedWord, MergeSummary};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WordError {
    #[error("Please add a word")]
    EmptyWord,

    #[error("Please add a definition")]
    EmptyDefinition,

    #[error("Word not found: {0}")]
    NotFound(WordId),

    #[error("No cards to delete")]
    NothingToDelete,
}

pub type Result<T> = std::result::Result<T, WordError>;

pub struct WordStore {
    words: Vec<WordEntry>,
    mode: ViewMode,
    displayed: Vec<WordId>,
    flusher: Option<FlushHandle>,
}

impl WordStore {
    /// A store that is never written to disk
    pub fn in_memory(words: Vec<WordEntry>) -> Self {
        let displayed = words.iter().map(|w| w.id).collect();
        Self {
            words,
            mode: ViewMode::default(),
            displayed,
            flusher: None,
        }
    }

    /// A store that persists every mutation through the flusher
    pub fn with_flusher(words: Vec<WordEntry>, flusher: FlushHandle) -> Self {
        let mut store = Self::in_memory(words);
        store.flusher = Some(flusher);
        store
    }

    // ===== Queries =====

    /// The canonical list, in insertion order
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    /// The displayed list for the current view mode
    pub fn displayed(&self) -> Vec<&WordEntry> {
        self.displayed.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn view_mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Index of a word in the displayed list (the scroll target)
    pub fn position_in_view(&self, id: WordId) -> Option<usize> {
        self.displayed.iter().position(|d| *d == id)
    }

    pub fn unique_tags(&self) -> Vec<String> {
        unique_tags(&self.words)
    }

    // ===== Mutations =====

    /// Append a new word. Word and definition must not be blank.
    pub fn add(&mut self, word: String, definition: String, tags: Vec<String>) -> Result<WordId> {
        if word.trim().is_empty() {
            return Err(WordError::EmptyWord);
        }
        if definition.trim().is_empty() {
            return Err(WordError::EmptyDefinition);
        }

        let entry = WordEntry::new(word, definition, tags);
        let id = entry.id;
        log::info!("Adding word '{}' ({})", entry.word, id);
        self.words.push(entry);
        self.reset_view();
        self.persist();
        Ok(id)
    }

    pub fn delete(&mut self, id: WordId) -> Result<WordEntry> {
        let pos = self
            .words
            .iter()
            .position(|w| w.id == id)
            .ok_or(WordError::NotFound(id))?;

        let removed = self.words.remove(pos);
        log::info!("Deleted word '{}' ({})", removed.word, id);
        self.reset_view();
        self.persist();
        Ok(removed)
    }

    /// Remove every word; returns how many were removed
    pub fn delete_all(&mut self) -> Result<usize> {
        if self.words.is_empty() {
            return Err(WordError::NothingToDelete);
        }
        let count = self.words.len();
        self.words.clear();
        self.reset_view();
        self.persist();
        log::info!("Deleted all {} words", count);
        Ok(count)
    }

    /// Flip the bookmark flag; returns the new value
    pub fn toggle_bookmark(&mut self, id: WordId) -> Result<bool> {
        let entry = self
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(WordError::NotFound(id))?;

        entry.is_marked = !entry.is_marked;
        let marked = entry.is_marked;

        if self.mode == ViewMode::Sorted(SortOrder::Marked) {
            self.refresh_view();
        }
        self.persist();
        Ok(marked)
    }

    /// Merge imported records by exact `word` match and commit the result.
    ///
    /// The displayed list reverts to insertion order.
    pub fn merge_import(&mut self, incoming: &[ImportedWord]) -> MergeSummary {
        let (merged, summary) = merge_words(&self.words, incoming);
        self.words = merged;
        self.reset_view();
        self.persist();
        log::info!(
            "Imported {} records: {} added, {} merged, {} duplicates collapsed",
            incoming.len(),
            summary.added,
            summary.merged,
            summary.collapsed
        );
        summary
    }

    // ===== View =====

    pub fn sort(&mut self, order: SortOrder) {
        self.mode = ViewMode::Sorted(order);
        self.refresh_view();
    }

    /// Show only words carrying any of the comma-separated tags.
    ///
    /// A blank query shows the whole list again.
    pub fn filter_by_tags(&mut self, query: &str) {
        let tags = parse_tag_query(query);
        self.mode = if tags.is_empty() {
            ViewMode::default()
        } else {
            ViewMode::Tagged(tags)
        };
        self.refresh_view();
    }

    fn reset_view(&mut self) {
        self.mode = ViewMode::default();
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let mut rng = rand::thread_rng();
        self.displayed = project(&self.words, &self.mode, &mut rng);
    }

    // ===== Persistence =====

    fn persist(&self) {
        if let Some(flusher) = &self.flusher {
            flusher.write(self.words.clone());
        }
    }

    /// Wait until all queued writes have reached storage
    pub async fn sync(&self) {
        if let Some(flusher) = &self.flusher {
            flusher.sync().await;
        }
    }

    /// Flush pending writes and stop the flusher. Later mutations stay in memory.
    pub async fn close(&mut self) {
        if let Some(flusher) = self.flusher.take() {
            flusher.sync().await;
            flusher.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use crate::words::parse_tag_input;
    use tempfile::TempDir;

    fn store_with(words: &[(&str, &str, &str)]) -> WordStore {
        let mut store = WordStore::in_memory(Vec::new());
        for (word, definition, tags) in words {
            store
                .add(word.to_string(), definition.to_string(), parse_tag_input(tags))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_add_requires_word_and_definition() {
        let mut store = WordStore::in_memory(Vec::new());
        let blank_word = store.add("  ".into(), "def".into(), Vec::new());
        assert_eq!(blank_word, Err(WordError::EmptyWord));
        let blank_definition = store.add("cat".into(), "".into(), Vec::new());
        assert_eq!(blank_definition, Err(WordError::EmptyDefinition));
        assert!(store.is_empty());

        let id = store.add("cat".into(), "feline".into(), Vec::new()).unwrap();
        let entry = store.get(id).unwrap();
        assert!(!entry.is_marked);
        assert_eq!(store.displayed().len(), 1);
    }

    #[test]
    fn test_delete_and_delete_all() {
        let mut store = store_with(&[("cat", "feline", ""), ("dog", "canine", "")]);
        let cat = store.words()[0].id;

        let removed = store.delete(cat).unwrap();
        assert_eq!(removed.word, "cat");
        assert_eq!(store.delete(cat), Err(WordError::NotFound(cat)));
        assert_eq!(store.len(), 1);

        assert_eq!(store.delete_all(), Ok(1));
        assert!(store.is_empty());
        assert!(store.displayed().is_empty());
    }

    #[test]
    fn test_delete_all_on_empty_list() {
        let mut store = WordStore::in_memory(Vec::new());
        assert_eq!(store.delete_all(), Err(WordError::NothingToDelete));
        assert_eq!(WordError::NothingToDelete.to_string(), "No cards to delete");
    }

    #[test]
    fn test_delete_resets_view_to_insertion_order() {
        let mut store = store_with(&[
            ("cat", "feline", "pet"),
            ("dog", "canine", "pet"),
            ("eel", "fish", ""),
        ]);
        store.sort(SortOrder::DateDesc);
        assert_eq!(store.displayed()[0].word, "eel");

        let dog = store.words()[1].id;
        store.delete(dog).unwrap();
        assert_eq!(*store.view_mode(), ViewMode::default());
        let shown: Vec<&str> = store.displayed().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(shown, vec!["cat", "eel"]);

        store.filter_by_tags("pet");
        assert_eq!(store.displayed().len(), 1);
        store.delete_all().unwrap();
        assert_eq!(*store.view_mode(), ViewMode::default());
        assert!(store.displayed().is_empty());
    }

    #[test]
    fn test_toggle_bookmark_updates_marked_view() {
        let mut store = store_with(&[("cat", "feline", ""), ("dog", "canine", "")]);
        let cat = store.words()[0].id;

        assert!(store.toggle_bookmark(cat).unwrap());
        store.sort(SortOrder::Marked);
        assert_eq!(store.displayed().len(), 1);

        assert!(!store.toggle_bookmark(cat).unwrap());
        assert!(store.displayed().is_empty());
    }

    #[test]
    fn test_filter_by_tags() {
        let mut store = store_with(&[
            ("cat", "feline", "Animal"),
            ("oak", "tree", "plant"),
            ("rose", "flower", "plant, red"),
        ]);

        store.filter_by_tags("animal, RED");
        let shown: Vec<&str> = store.displayed().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(shown, vec!["cat", "rose"]);

        let oak = store.words()[1].id;
        assert_eq!(store.position_in_view(oak), None);

        store.filter_by_tags("  ");
        assert_eq!(store.displayed().len(), 3);
        assert_eq!(store.position_in_view(oak), Some(1));
    }

    #[test]
    fn test_add_resets_view_to_insertion_order() {
        let mut store = store_with(&[("cat", "feline", ""), ("dog", "canine", "")]);
        store.sort(SortOrder::DateDesc);
        assert_eq!(store.displayed()[0].word, "dog");

        store.add("eel".into(), "fish".into(), Vec::new()).unwrap();
        assert_eq!(*store.view_mode(), ViewMode::default());
        let shown: Vec<&str> = store.displayed().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(shown, vec!["cat", "dog", "eel"]);
    }

    #[test]
    fn test_merge_import_resets_view() {
        let mut store = store_with(&[("cat", "old-def", "y")]);
        store.filter_by_tags("nothing");
        assert!(store.displayed().is_empty());

        let incoming = vec![ImportedWord {
            word: "cat".into(),
            definition: "new-def".into(),
            tags: vec!["x".into()],
        }];
        let summary = store.merge_import(&incoming);

        assert_eq!(summary.merged, 1);
        assert_eq!(store.displayed().len(), 1);
        assert_eq!(store.words()[0].definition, "old-def");
    }

    #[tokio::test]
    async fn test_mutations_reach_storage_eventually() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let flusher = FlushHandle::spawn(storage.clone());
        let mut store = WordStore::with_flusher(Vec::new(), flusher);

        let id = store.add("cat".into(), "feline".into(), vec!["pet".into()]).unwrap();
        store.toggle_bookmark(id).unwrap();
        store.sync().await;

        let saved = storage.load_words().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert!(saved[0].is_marked);
    }

    #[tokio::test]
    async fn test_close_flushes_then_stops_persisting() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let flusher = FlushHandle::spawn(storage.clone());
        let mut store = WordStore::with_flusher(Vec::new(), flusher);

        store.add("cat".into(), "feline".into(), Vec::new()).unwrap();
        store.close().await;
        store.add("dog".into(), "canine".into(), Vec::new()).unwrap();
        store.sync().await;

        assert_eq!(store.len(), 2);
        let saved = storage.load_words().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].word, "cat");
    }
}
