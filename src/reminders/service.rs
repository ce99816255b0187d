//! Notification service abstraction
//!
//! The scheduler talks to the platform notification queue only through
//! `NotificationService`. Two implementations ship with the crate: an
//! in-process center and a file-backed outbox used by the CLI.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NotificationRequest, PendingNotification, PermissionStatus};
use crate::storage::write_atomic;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification quota of {0} reached")]
    QuotaExceeded(usize),

    #[error("Notification service unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotificationError>;

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Ask for (or report the already decided) notification permission
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Cancel every pending notification of this app
    async fn cancel_all(&self) -> Result<()>;

    /// Queue one notification; returns the service's id for it
    async fn schedule(&self, request: NotificationRequest) -> Result<String>;

    /// Notifications queued and not yet delivered
    async fn pending(&self) -> Result<Vec<PendingNotification>>;
}

// ===== In-process center =====

struct CenterState {
    permission: PermissionStatus,
    capacity: Option<usize>,
    pending: Vec<PendingNotification>,
    next_id: u64,
}

/// Notification center held in memory.
///
/// Nothing is delivered; embedders read `pending()` and fire notifications
/// themselves. An optional capacity mirrors platform quotas.
pub struct MemoryNotificationCenter {
    state: Mutex<CenterState>,
}

impl MemoryNotificationCenter {
    pub fn new(permission: PermissionStatus) -> Self {
        Self {
            state: Mutex::new(CenterState {
                permission,
                capacity: None,
                pending: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn with_capacity_limit(permission: PermissionStatus, capacity: usize) -> Self {
        let center = Self::new(permission);
        if let Ok(mut state) = center.state.lock() {
            state.capacity = Some(capacity);
        }
        center
    }

    pub fn set_permission(&self, permission: PermissionStatus) {
        if let Ok(mut state) = self.state.lock() {
            state.permission = permission;
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CenterState>> {
        self.state
            .lock()
            .map_err(|_| {
                NotificationError::Unavailable("notification center lock poisoned".to_string())
            })
    }
}

#[async_trait]
impl NotificationService for MemoryNotificationCenter {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.lock()?.permission)
    }

    async fn cancel_all(&self) -> Result<()> {
        self.lock()?.pending.clear();
        Ok(())
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String> {
        let mut state = self.lock()?;
        if let Some(capacity) = state.capacity {
            if state.pending.len() >= capacity {
                return Err(NotificationError::QuotaExceeded(capacity));
            }
        }

        let id = format!("local-{}", state.next_id);
        state.next_id += 1;
        state.pending.push(PendingNotification {
            id: id.clone(),
            request,
        });
        Ok(id)
    }

    async fn pending(&self) -> Result<Vec<PendingNotification>> {
        Ok(self.lock()?.pending.clone())
    }
}

// ===== File-backed outbox =====

/// Notification queue persisted as a JSON file.
///
/// Permission is decided up front from the user's settings. Entries whose
/// trigger time has passed count as delivered and are not reported.
pub struct OutboxNotificationCenter {
    path: PathBuf,
    permission: PermissionStatus,
    io_lock: Mutex<()>,
}

impl OutboxNotificationCenter {
    pub fn new(path: PathBuf, notifications_enabled: bool) -> Self {
        let permission = if notifications_enabled {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Self {
            path,
            permission,
            io_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<Vec<PendingNotification>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, pending: &[PendingNotification]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(pending)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.io_lock
            .lock()
            .map_err(|_| NotificationError::Unavailable("outbox lock poisoned".to_string()))
    }
}

#[async_trait]
impl NotificationService for OutboxNotificationCenter {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn cancel_all(&self) -> Result<()> {
        let _guard = self.guard()?;
        self.write_all(&[])
    }

    async fn schedule(&self, request: NotificationRequest) -> Result<String> {
        let _guard = self.guard()?;
        let mut pending = self.read_all()?;
        let id = Uuid::new_v4().to_string();
        pending.push(PendingNotification {
            id: id.clone(),
            request,
        });
        self.write_all(&pending)?;
        Ok(id)
    }

    async fn pending(&self) -> Result<Vec<PendingNotification>> {
        let _guard = self.guard()?;
        let now = Utc::now();
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|p| p.request.trigger_at > now)
            .collect())
    }
}
