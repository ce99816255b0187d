//! Slot computation and round-robin binding
//!
//! Slots start at `startHour:00` local time and step by the interval while
//! the slot is at or before `endHour:00`. Slots at or before "now" are
//! dropped, so the result is strictly increasing and entirely in the future.

use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone};

use super::config::ReminderConfig;

/// Compute the future trigger times for today (plus `days_ahead` days)
pub fn compute_slots<Tz: TimeZone>(
    config: &ReminderConfig,
    now: &DateTime<Tz>,
) -> Vec<DateTime<Tz>> {
    let mut slots: Vec<DateTime<Tz>> = Vec::new();
    if config.start_hour >= config.end_hour || config.interval_minutes == 0 {
        return slots;
    }

    let tz = now.timezone();
    let step = Duration::minutes(i64::from(config.interval_minutes));
    let today = now.naive_local().date();

    for offset in 0..=config.days_ahead {
        let Some(day) = today.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        let midnight = day.and_time(NaiveTime::MIN);
        let start = midnight + Duration::hours(i64::from(config.start_hour));
        let end = midnight + Duration::hours(i64::from(config.end_hour));

        let mut local = start;
        while local <= end {
            // Local times skipped by a DST jump have no instant
            if let Some(at) = tz.from_local_datetime(&local).earliest() {
                let after_last = slots.last().map_or(true, |last| at > *last);
                if at > *now && after_last {
                    slots.push(at);
                }
            }
            local += step;
        }
    }

    slots
}

/// Pair slot `i` with `items[i % items.len()]`
pub fn bind_round_robin<'a, S: Clone, T>(slots: &[S], items: &'a [T]) -> Vec<(S, &'a T)> {
    if items.is_empty() {
        return Vec::new();
    }
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| (slot.clone(), &items[i % items.len()]))
        .collect()
}
