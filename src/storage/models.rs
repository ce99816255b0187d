use serde::{Deserialize, Serialize};

use crate::reminders::ReminderConfig;

fn default_deep_link_scheme() -> String {
    "flashword".to_string()
}

fn default_notifications_enabled() -> bool {
    true
}

/// User settings persisted next to the word list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub reminders: ReminderConfig,
    /// Whether the user has allowed reminder notifications
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
    /// Scheme used for `<scheme>://word/<id>` links
    #[serde(default = "default_deep_link_scheme")]
    pub deep_link_scheme: String,
    /// Set once the user has been told reminders are off; cleared when
    /// permission is granted again
    #[serde(default)]
    pub permission_notice_shown: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminders: ReminderConfig::default(),
            notifications_enabled: default_notifications_enabled(),
            deep_link_scheme: default_deep_link_scheme(),
            permission_notice_shown: false,
        }
    }
}
