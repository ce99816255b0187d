use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use flashword_lib::reminders::{OutboxNotificationCenter, ScheduleOutcome};
use flashword_lib::storage::FileStorage;
use flashword_lib::words::{WordEntry, WordId};
use flashword_lib::{AllowAll, Session, SessionError};

/// Shared application state for CLI commands
pub struct App {
    pub session: Session,
}

impl App {
    /// Storage rooted at `data_dir`, or the platform data directory
    pub fn storage(data_dir: Option<&Path>) -> Result<FileStorage> {
        let base = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => FileStorage::default_data_dir().context("Failed to get data directory")?,
        };
        Ok(FileStorage::new(base))
    }

    /// Open the session; reminders go to the outbox file in the data directory
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        let storage = Self::storage(data_dir)?;
        storage.init().context("Failed to initialize storage")?;
        let settings = storage.load_settings().context("Failed to load settings")?;

        let outbox =
            OutboxNotificationCenter::new(storage.reminders_path(), settings.notifications_enabled);
        let session = Session::open(storage, Arc::new(outbox), Box::new(AllowAll))
            .context("Failed to open word list")?;
        Ok(Self { session })
    }

    /// Find a word by id (exact, then unique prefix)
    pub fn find_word(&self, id: &str) -> Result<WordEntry> {
        let words = self.session.store().words();

        if let Ok(exact) = id.parse::<WordId>() {
            if let Some(entry) = self.session.store().get(exact) {
                return Ok(entry.clone());
            }
        }

        let prefix = id.to_lowercase();
        let matches: Vec<&WordEntry> = words
            .iter()
            .filter(|w| w.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No word with id '{}'", id),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous id '{}'. Matches:\n{}",
                id,
                matches
                    .iter()
                    .map(|w| format!("  - {} ({})", w.id, w.word))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Surface a one-time permission notice, then flush and close the session
    pub async fn finish(&mut self) {
        if let Some(report) = self.session.last_schedule() {
            if report.outcome == (ScheduleOutcome::PermissionDenied { first_notice: true }) {
                eprintln!("Notifications are turned off; reminders were not scheduled.");
            }
        }
        self.session.close().await;
    }
}

/// Turn a session error into the message shown to the user
pub fn user_error(err: SessionError) -> anyhow::Error {
    log::debug!("{:?}", err);
    anyhow::anyhow!(err.user_message())
}
