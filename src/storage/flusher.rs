//! Best-effort asynchronous persistence
//!
//! Mutations hand a snapshot of the word list to a background task and
//! return without waiting. A crash between the in-memory mutation and the
//! write loses that mutation. `FlushHandle::sync` waits for every snapshot
//! queued before it to be written.

use tokio::sync::{mpsc, oneshot};

use super::file_storage::FileStorage;
use crate::words::WordEntry;

/// Message types for flusher communication
#[derive(Debug)]
pub enum FlushMessage {
    /// Replace the stored list with this snapshot
    Write(Vec<WordEntry>),
    /// Reply once all earlier writes are done
    Sync(oneshot::Sender<()>),
    /// Stop the flusher
    Shutdown,
}

/// Sending side of the flusher task
#[derive(Debug, Clone)]
pub struct FlushHandle {
    sender: mpsc::UnboundedSender<FlushMessage>,
}

impl FlushHandle {
    /// Start the flusher on the current tokio runtime
    pub fn spawn(storage: FileStorage) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            flush_loop(storage, rx).await;
        });
        Self { sender: tx }
    }

    /// Queue a snapshot for writing (fire-and-forget)
    pub fn write(&self, words: Vec<WordEntry>) {
        if self.sender.send(FlushMessage::Write(words)).is_err() {
            log::warn!("Flusher is not running; dropping snapshot");
        }
    }

    /// Wait until every snapshot queued so far has been written
    pub async fn sync(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(FlushMessage::Sync(tx)).is_err() {
            return;
        }
        let _ = rx.await;
    }

    pub fn shutdown(&self) {
        let _ = self.sender.send(FlushMessage::Shutdown);
    }
}

/// Main flusher loop
async fn flush_loop(storage: FileStorage, mut receiver: mpsc::UnboundedReceiver<FlushMessage>) {
    while let Some(msg) = receiver.recv().await {
        match msg {
            FlushMessage::Write(mut words) => {
                // Only the newest queued snapshot matters
                let mut pending = Vec::new();
                while let Ok(next) = receiver.try_recv() {
                    match next {
                        FlushMessage::Write(newer) => words = newer,
                        other => {
                            pending.push(other);
                            break;
                        }
                    }
                }

                write_snapshot(&storage, &words).await;

                for other in pending {
                    match other {
                        FlushMessage::Sync(reply) => {
                            let _ = reply.send(());
                        }
                        FlushMessage::Shutdown => {
                            log::info!("Flusher: Shutting down");
                            return;
                        }
                        FlushMessage::Write(_) => {}
                    }
                }
            }
            FlushMessage::Sync(reply) => {
                let _ = reply.send(());
            }
            FlushMessage::Shutdown => {
                log::info!("Flusher: Shutting down");
                break;
            }
        }
    }
}

async fn write_snapshot(storage: &FileStorage, words: &[WordEntry]) {
    let storage = storage.clone();
    let words = words.to_vec();
    let count = words.len();
    let result = tokio::task::spawn_blocking(move || storage.save_words(&words)).await;

    match result {
        Ok(Ok(())) => log::debug!("Flusher: wrote {} words", count),
        Ok(Err(e)) => log::error!("Flusher: failed to write word list: {}", e),
        Err(e) => log::error!("Flusher: write task panicked: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sync_waits_for_queued_writes() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let handle = FlushHandle::spawn(storage.clone());

        let first = vec![WordEntry::new("cat".into(), "feline".into(), Vec::new())];
        let mut second = first.clone();
        second.push(WordEntry::new("dog".into(), "canine".into(), Vec::new()));

        handle.write(first);
        handle.write(second.clone());
        handle.sync().await;

        assert_eq!(storage.load_words().unwrap(), second);
    }

    #[tokio::test]
    async fn test_write_after_shutdown_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        let handle = FlushHandle::spawn(storage.clone());

        handle.shutdown();
        handle.sync().await;
        handle.write(vec![WordEntry::new("cat".into(), "feline".into(), Vec::new())]);
        handle.sync().await;

        assert!(storage.load_words().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_logged_and_loop_keeps_running() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("blocked");
        std::fs::write(&base, "not a directory").unwrap();
        let storage = FileStorage::new(base.clone());
        let handle = FlushHandle::spawn(storage.clone());

        handle.write(vec![WordEntry::new("cat".into(), "feline".into(), Vec::new())]);
        handle.sync().await;
        assert!(base.is_file());

        std::fs::remove_file(&base).unwrap();
        let words = vec![WordEntry::new("dog".into(), "canine".into(), Vec::new())];
        handle.write(words.clone());
        handle.sync().await;

        assert_eq!(storage.load_words().unwrap(), words);
    }
}
