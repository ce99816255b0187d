//! Data models for reminder notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deep_link::DeepLink;
use crate::words::{WordEntry, WordId};

pub const NOTIFICATION_TITLE: &str = "Flash Word";

/// Result of asking the platform for notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Application data carried by a notification, consumed on tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub word_id: WordId,
    pub url: String,
}

/// A notification to be delivered at a fixed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub trigger_at: DateTime<Utc>,
    pub data: NotificationData,
}

impl NotificationRequest {
    /// Reminder for one word, deep-linking back to its card
    pub fn for_word(word: &WordEntry, trigger_at: DateTime<Utc>, scheme: &str) -> Self {
        let link = DeepLink::new(scheme, word.id);
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: format!("Do you remember {}?", word.word),
            trigger_at,
            data: NotificationData {
                word_id: word.id,
                url: link.to_uri(),
            },
        }
    }
}

/// A notification accepted by the service and not yet delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub id: String,
    pub request: NotificationRequest,
}

/// One reminder created by a scheduling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    /// Identifier assigned by the notification service
    pub notification_id: String,
    pub trigger_at: DateTime<Utc>,
    pub word_id: WordId,
    pub deep_link: String,
}

/// How a scheduling run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Previous reminders cancelled and new ones submitted
    Scheduled,
    /// Previous reminders cancelled; the word list is empty
    NoWords,
    /// Nothing was touched. `first_notice` is set the first time in a row
    /// this happens so the user is told only once.
    PermissionDenied { first_notice: bool },
}

/// Report of a scheduling run
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleReport {
    pub outcome: ScheduleOutcome,
    /// Word order used for binding in this run
    pub shuffled: Vec<WordId>,
    /// Reminders accepted by the service, in slot order
    pub scheduled: Vec<ScheduledReminder>,
    /// Slots whose submission failed and were skipped
    pub failed: usize,
}

impl ScheduleReport {
    pub fn empty(outcome: ScheduleOutcome) -> Self {
        Self {
            outcome,
            shuffled: Vec::new(),
            scheduled: Vec::new(),
            failed: 0,
        }
    }
}
