//! Application session
//!
//! Owns the word store, the reminder scheduler and the settings. Content
//! changes to the word list persist in the background and then rebuild the
//! reminder schedule. View changes (sort, filter) and bookmark toggles do
//! neither.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use crate::gate::{ActionGate, GatedAction};
use crate::reminders::{
    DeepLink, DeepLinkError, NotificationService, ReminderConfig, ReminderError,
    ReminderScheduler, ScheduleReport,
};
use crate::storage::{FileStorage, FlushHandle, Settings, StorageError};
use crate::transfer::{self, MergeSummary, TransferError};
use crate::words::{SortOrder, WordEntry, WordError, WordId, WordStore};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Words(#[from] WordError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Reminder(#[from] ReminderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DeepLink(#[from] DeepLinkError),

    #[error("Action not allowed: {0}")]
    Blocked(GatedAction),
}

impl SessionError {
    /// Short message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Words(e) => e.to_string(),
            SessionError::Transfer(TransferError::InvalidFormat(_)) => {
                "Invalid format".to_string()
            }
            SessionError::Transfer(TransferError::NothingToExport) => {
                "No words to export".to_string()
            }
            SessionError::Transfer(_) | SessionError::Storage(_) => {
                "Failed, please try again".to_string()
            }
            SessionError::Reminder(ReminderError::InvalidConfig(msg)) => msg.clone(),
            SessionError::Reminder(ReminderError::Notification(_)) => {
                "Could not update reminders, please try again".to_string()
            }
            SessionError::DeepLink(_) => "That link does not point to a word".to_string(),
            SessionError::Blocked(action) => format!("The {} action is not available", action),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

pub struct Session {
    storage: FileStorage,
    store: WordStore,
    settings: Settings,
    scheduler: ReminderScheduler,
    gate: Box<dyn ActionGate>,
    last_schedule: Option<ScheduleReport>,
}

impl Session {
    /// Load the stored words and settings and start the background flusher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        storage: FileStorage,
        service: Arc<dyn NotificationService>,
        gate: Box<dyn ActionGate>,
    ) -> Result<Self> {
        storage.init()?;
        let words = storage.load_words()?;
        let settings = storage.load_settings()?;
        log::info!(
            "Opened session at {:?} with {} words",
            storage.base_path(),
            words.len()
        );

        let flusher = FlushHandle::spawn(storage.clone());
        let scheduler =
            ReminderScheduler::with_notice_shown(service, settings.permission_notice_shown);
        Ok(Self {
            storage,
            store: WordStore::with_flusher(words, flusher),
            settings,
            scheduler,
            gate,
            last_schedule: None,
        })
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notifications(&self) -> &Arc<dyn NotificationService> {
        self.scheduler.service()
    }

    /// Report of the most recent scheduling run, if any ran
    pub fn last_schedule(&self) -> Option<&ScheduleReport> {
        self.last_schedule.as_ref()
    }

    // ===== Word list =====

    pub async fn add_word(
        &mut self,
        word: String,
        definition: String,
        tags: Vec<String>,
    ) -> Result<WordId> {
        let id = self.store.add(word, definition, tags)?;
        self.refresh_reminders().await;
        Ok(id)
    }

    pub async fn delete_word(&mut self, id: WordId) -> Result<WordEntry> {
        let removed = self.store.delete(id)?;
        self.refresh_reminders().await;
        Ok(removed)
    }

    pub async fn delete_all(&mut self) -> Result<usize> {
        self.check_gate(GatedAction::DeleteAll)?;
        let count = self.store.delete_all()?;
        self.refresh_reminders().await;
        Ok(count)
    }

    /// Flip a bookmark. The schedule does not depend on bookmarks.
    pub fn toggle_bookmark(&mut self, id: WordId) -> Result<bool> {
        Ok(self.store.toggle_bookmark(id)?)
    }

    // ===== View =====

    /// Reorder the displayed list. The word list and schedule are untouched.
    pub fn sort(&mut self, order: SortOrder) {
        self.store.sort(order);
    }

    /// Show only words carrying any of the comma-separated tags
    pub fn filter_by_tags(&mut self, query: &str) {
        self.store.filter_by_tags(query);
    }

    // ===== Import / export =====

    pub async fn import_file(&mut self, path: &Path) -> Result<MergeSummary> {
        self.check_gate(GatedAction::Import)?;
        let incoming = transfer::read_import_file(path)?;
        Ok(self.commit_import(&incoming).await)
    }

    /// Import from JSON text. Nothing changes unless the whole text parses.
    pub async fn import_str(&mut self, content: &str) -> Result<MergeSummary> {
        self.check_gate(GatedAction::Import)?;
        let incoming = transfer::parse_import(content)?;
        Ok(self.commit_import(&incoming).await)
    }

    async fn commit_import(&mut self, incoming: &[transfer::ImportedWord]) -> MergeSummary {
        let summary = self.store.merge_import(incoming);
        self.refresh_reminders().await;
        summary
    }

    /// Write the word list to a timestamped file in `dir`
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        self.check_gate(GatedAction::Export)?;
        Ok(transfer::write_export(dir, self.store.words(), &Local::now())?)
    }

    // ===== Reminders =====

    /// Replace the whole settings block and rebuild the schedule
    pub async fn update_settings(&mut self, settings: Settings) -> Result<ScheduleReport> {
        settings.reminders.validate()?;
        self.storage.save_settings(&settings)?;
        self.settings = settings;
        self.reschedule().await
    }

    pub async fn update_reminder_config(
        &mut self,
        config: ReminderConfig,
    ) -> Result<ScheduleReport> {
        let settings = Settings {
            reminders: config,
            ..self.settings.clone()
        };
        self.update_settings(settings).await
    }

    /// Rebuild the reminder schedule from the current list
    pub async fn reschedule(&mut self) -> Result<ScheduleReport> {
        let report = self
            .scheduler
            .reschedule(
                self.store.words(),
                &self.settings.reminders,
                &self.settings.deep_link_scheme,
            )
            .await?;
        self.last_schedule = Some(report.clone());
        self.remember_notice()?;
        Ok(report)
    }

    /// Keep the stored notice flag in step with the scheduler
    fn remember_notice(&mut self) -> Result<()> {
        let shown = self.scheduler.notice_shown();
        if shown != self.settings.permission_notice_shown {
            self.settings.permission_notice_shown = shown;
            self.storage.save_settings(&self.settings)?;
        }
        Ok(())
    }

    async fn refresh_reminders(&mut self) {
        if let Err(e) = self.reschedule().await {
            log::error!("Failed to update reminders: {}", e);
        }
    }

    /// Resolve a reminder link to its word and position in the displayed list
    pub fn open_deep_link(&self, uri: &str) -> Result<(WordEntry, Option<usize>)> {
        let link = DeepLink::parse_for_scheme(uri, &self.settings.deep_link_scheme)?;
        let entry = self
            .store
            .get(link.word_id)
            .cloned()
            .ok_or(WordError::NotFound(link.word_id))?;
        Ok((entry, self.store.position_in_view(link.word_id)))
    }

    // ===== Lifecycle =====

    /// Wait until all queued writes have reached storage
    pub async fn sync(&self) {
        self.store.sync().await;
    }

    /// Write everything queued and stop the background flusher
    pub async fn close(&mut self) {
        self.store.close().await;
        log::info!("Closed session at {:?}", self.storage.base_path());
    }

    fn check_gate(&self, action: GatedAction) -> Result<()> {
        if self.gate.can_proceed(action) {
            Ok(())
        } else {
            log::info!("Gate refused {}", action);
            Err(SessionError::Blocked(action))
        }
    }
}
