use std::path::Path;

use anyhow::{Context, Result};

use flashword_lib::reminders::{ScheduleOutcome, ScheduleReport};

use crate::app::{user_error, App};
use crate::render::terminal::render_pending;
use crate::OutputFormat;

/// Settings flags given on the command line
pub struct SettingsChanges {
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub interval: Option<u32>,
    pub days_ahead: Option<u32>,
    pub notifications: Option<bool>,
}

impl SettingsChanges {
    fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.interval.is_none()
            && self.days_ahead.is_none()
            && self.notifications.is_none()
    }
}

pub async fn run_pending(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let pending = app
        .session
        .notifications()
        .pending()
        .await
        .context("Failed to read pending reminders")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pending)?),
        OutputFormat::Plain => {
            if pending.is_empty() {
                println!("No pending reminders.");
                return Ok(());
            }
            for p in &pending {
                println!("{}", render_pending(p, use_color));
            }
            println!("\n{} reminders pending", pending.len());
        }
    }
    Ok(())
}

pub async fn run_schedule(app: &mut App, format: &OutputFormat) -> Result<()> {
    let report = app.session.reschedule().await.map_err(user_error)?;
    print_report(&report, format);
    Ok(())
}

pub async fn run_settings(
    data_dir: Option<&Path>,
    changes: SettingsChanges,
    format: &OutputFormat,
) -> Result<()> {
    let storage = App::storage(data_dir)?;
    let current = storage.load_settings().context("Failed to load settings")?;

    if changes.is_empty() {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&current)?),
            OutputFormat::Plain => {
                let r = &current.reminders;
                println!("Window:        {:02}:00 - {:02}:00", r.start_hour, r.end_hour);
                println!("Interval:      {} minutes", r.interval_minutes);
                println!("Days ahead:    {}", r.days_ahead);
                println!(
                    "Notifications: {}",
                    if current.notifications_enabled { "on" } else { "off" }
                );
            }
        }
        return Ok(());
    }

    let mut updated = current.clone();
    if let Some(start) = changes.start {
        updated.reminders.start_hour = start;
    }
    if let Some(end) = changes.end {
        updated.reminders.end_hour = end;
    }
    if let Some(interval) = changes.interval {
        updated.reminders.interval_minutes = interval;
    }
    if let Some(days_ahead) = changes.days_ahead {
        updated.reminders.days_ahead = days_ahead;
    }
    if let Some(enabled) = changes.notifications {
        updated.notifications_enabled = enabled;
        if enabled {
            // A later denial should be reported again
            updated.permission_notice_shown = false;
        }
    }
    updated
        .reminders
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // The outbox takes its permission from the stored settings
    storage.init().context("Failed to initialize storage")?;
    storage.save_settings(&updated).context("Failed to save settings")?;

    let mut app = App::open(data_dir)?;
    let report = app.session.update_settings(updated).await.map_err(user_error)?;
    print_report(&report, format);
    app.finish().await;
    Ok(())
}

fn print_report(report: &ScheduleReport, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            let outcome = match report.outcome {
                ScheduleOutcome::Scheduled => "scheduled",
                ScheduleOutcome::NoWords => "noWords",
                ScheduleOutcome::PermissionDenied { .. } => "permissionDenied",
            };
            println!(
                "{}",
                serde_json::json!({
                    "outcome": outcome,
                    "scheduled": report.scheduled,
                    "failed": report.failed,
                })
            );
        }
        OutputFormat::Plain => match report.outcome {
            ScheduleOutcome::Scheduled => {
                println!("Scheduled {} reminders", report.scheduled.len());
                if report.failed > 0 {
                    println!("{} reminders could not be scheduled", report.failed);
                }
            }
            ScheduleOutcome::NoWords => println!("No words to remind you about."),
            // App::finish prints the notice
            ScheduleOutcome::PermissionDenied { .. } => {}
        },
    }
}
