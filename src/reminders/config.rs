use serde::{Deserialize, Serialize};

use super::{ReminderError, Result};

/// Shortest interval the settings accept, to keep the slot count sane
pub const MIN_INTERVAL_MINUTES: u32 = 10;

/// Furthest the schedule may reach past today
pub const MAX_DAYS_AHEAD: u32 = 7;

fn default_start_hour() -> u32 {
    9
}

fn default_end_hour() -> u32 {
    21
}

fn default_interval_minutes() -> u32 {
    40
}

/// Daily reminder window `[startHour, endHour]` and slot spacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// 24 means midnight at the end of the day
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    /// Extra days after today to schedule (0 = today only)
    #[serde(default)]
    pub days_ahead: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            interval_minutes: default_interval_minutes(),
            days_ahead: 0,
        }
    }
}

impl ReminderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_hour > 23 {
            return Err(ReminderError::InvalidConfig(format!(
                "Start hour must be between 0 and 23, got {}",
                self.start_hour
            )));
        }
        if self.end_hour < self.start_hour || self.end_hour > 24 {
            return Err(ReminderError::InvalidConfig(format!(
                "End hour must be between {} and 24, got {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.interval_minutes < MIN_INTERVAL_MINUTES {
            return Err(ReminderError::InvalidConfig(format!(
                "Interval must be at least {} minutes, got {}",
                MIN_INTERVAL_MINUTES, self.interval_minutes
            )));
        }
        if self.days_ahead > MAX_DAYS_AHEAD {
            return Err(ReminderError::InvalidConfig(format!(
                "Days ahead must be at most {}, got {}",
                MAX_DAYS_AHEAD, self.days_ahead
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start_hour: u32, end_hour: u32, interval_minutes: u32) -> ReminderConfig {
        ReminderConfig {
            start_hour,
            end_hour,
            interval_minutes,
            days_ahead: 0,
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ReminderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(config(0, 24, 10).validate().is_ok());
        assert!(config(9, 9, 40).validate().is_ok());
        assert!(config(24, 24, 40).validate().is_err());
        assert!(config(10, 9, 40).validate().is_err());
        assert!(config(9, 25, 40).validate().is_err());
        assert!(config(9, 21, 9).validate().is_err());

        let mut far = config(9, 21, 40);
        far.days_ahead = MAX_DAYS_AHEAD + 1;
        assert!(far.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: ReminderConfig = serde_json::from_str(r#"{"intervalMinutes":15}"#).unwrap();
        assert_eq!(parsed, config(9, 21, 15));
    }
}
