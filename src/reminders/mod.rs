//! Reminder notifications
//!
//! Turns the word list and the daily reminder window into a set of future
//! notifications, each asking about one word and linking back to its card.

pub mod config;
pub mod deep_link;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod slots;

use thiserror::Error;

pub use config::ReminderConfig;
pub use deep_link::{DeepLink, DeepLinkError};
pub use models::*;
pub use scheduler::ReminderScheduler;
pub use service::{
    MemoryNotificationCenter, NotificationError, NotificationService, OutboxNotificationCenter,
};
pub use slots::{bind_round_robin, compute_slots};

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Invalid reminder settings: {0}")]
    InvalidConfig(String),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

pub type Result<T> = std::result::Result<T, ReminderError>;
