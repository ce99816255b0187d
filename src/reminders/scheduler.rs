//! Reminder Scheduler
//!
//! Rebuilds the whole reminder schedule from the current word list. Every
//! run cancels what the previous run queued and then submits a fresh set,
//! so the schedule is never updated incrementally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::ReminderConfig;
use super::models::{
    NotificationRequest, PermissionStatus, ScheduleOutcome, ScheduleReport, ScheduledReminder,
};
use super::service::NotificationService;
use super::slots::{bind_round_robin, compute_slots};
use super::Result;
use crate::words::WordEntry;

pub struct ReminderScheduler {
    service: Arc<dyn NotificationService>,
    denial_reported: AtomicBool,
}

impl ReminderScheduler {
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self::with_notice_shown(service, false)
    }

    /// Start from a stored notice flag, so a denial already reported in an
    /// earlier run is not reported again
    pub fn with_notice_shown(service: Arc<dyn NotificationService>, shown: bool) -> Self {
        Self {
            service,
            denial_reported: AtomicBool::new(shown),
        }
    }

    pub fn service(&self) -> &Arc<dyn NotificationService> {
        &self.service
    }

    /// Whether the current denial has already been reported
    pub fn notice_shown(&self) -> bool {
        self.denial_reported.load(Ordering::SeqCst)
    }

    /// Replace the current schedule using local time and a fresh shuffle
    pub async fn reschedule(
        &self,
        words: &[WordEntry],
        config: &ReminderConfig,
        scheme: &str,
    ) -> Result<ScheduleReport> {
        let mut rng = StdRng::from_entropy();
        self.reschedule_at(words, config, scheme, Local::now(), &mut rng)
            .await
    }

    /// Replace the current schedule as of `now`
    pub async fn reschedule_at<Tz, R>(
        &self,
        words: &[WordEntry],
        config: &ReminderConfig,
        scheme: &str,
        now: DateTime<Tz>,
        rng: &mut R,
    ) -> Result<ScheduleReport>
    where
        Tz: TimeZone + Send + Sync,
        Tz::Offset: Send + Sync,
        R: Rng + Send,
    {
        config.validate()?;

        let permission = self.service.request_permission().await?;
        if permission != PermissionStatus::Granted {
            let first_notice = !self.denial_reported.swap(true, Ordering::SeqCst);
            if first_notice {
                log::warn!("Notification permission not granted; reminders are disabled");
            }
            return Ok(ScheduleReport::empty(ScheduleOutcome::PermissionDenied {
                first_notice,
            }));
        }
        self.denial_reported.store(false, Ordering::SeqCst);

        self.service.cancel_all().await?;
        if words.is_empty() {
            log::info!("No words to remind about; schedule cleared");
            return Ok(ScheduleReport::empty(ScheduleOutcome::NoWords));
        }

        let mut shuffled: Vec<&WordEntry> = words.iter().collect();
        shuffled.shuffle(rng);

        let slots: Vec<DateTime<Utc>> = compute_slots(config, &now)
            .iter()
            .map(|slot| slot.with_timezone(&Utc))
            .collect();

        let mut report = ScheduleReport {
            outcome: ScheduleOutcome::Scheduled,
            shuffled: shuffled.iter().map(|w| w.id).collect(),
            scheduled: Vec::with_capacity(slots.len()),
            failed: 0,
        };

        for (trigger_at, word) in bind_round_robin(&slots, &shuffled) {
            let request = NotificationRequest::for_word(word, trigger_at, scheme);
            let deep_link = request.data.url.clone();
            match self.service.schedule(request).await {
                Ok(notification_id) => report.scheduled.push(ScheduledReminder {
                    notification_id,
                    trigger_at,
                    word_id: word.id,
                    deep_link,
                }),
                Err(e) => {
                    log::warn!("Skipping reminder for '{}' at {}: {}", word.word, trigger_at, e);
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "Scheduled {} reminders for {} words ({} failed)",
            report.scheduled.len(),
            words.len(),
            report.failed
        );
        Ok(report)
    }
}
