//! Checkpoint reminder generation.
//!
//! The one piece of business logic kept inside the core, because it is
//! inseparable from the notification collection's dedup contract: a
//! reminder's message text is deterministic for a given checkpoint, and
//! [`crate::repos::notifications::has_duplicate`] keys on that exact text
//! to keep regeneration idempotent.

use chrono::{Duration, NaiveDate};

use crate::error::Result;
use crate::model::{CheckpointStatus, Notification, NotificationKind, TrackingSheet};
use crate::repos::notifications;
use crate::store::StorageBackend;

/// A checkpoint qualifies when its week falls strictly between today and
/// this many days out.
pub const REMINDER_WINDOW_DAYS: i64 = 3;

pub const REMINDER_AUTHOR: &str = "system";

/// One upcoming consultation, as the generator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub number: u8,
    pub week: NaiveDate,
}

/// The upcoming (not yet completed) checkpoints of a sheet, in order.
pub fn schedule_of(sheet: &TrackingSheet) -> Vec<ScheduleEntry> {
    sheet
        .checkpoints
        .iter()
        .filter(|c| c.status != CheckpointStatus::Completed)
        .map(|c| ScheduleEntry {
            number: c.number,
            week: c.week,
        })
        .collect()
}

/// Deterministic reminder text, parameterized only by checkpoint number
/// and date. Changing this string invalidates the dedup history.
pub fn message_for(entry: &ScheduleEntry) -> String {
    format!(
        "Checkpoint {} is scheduled for {}",
        entry.number,
        entry.week.format("%Y-%m-%d")
    )
}

/// Insert a personal reminder for each qualifying checkpoint the student
/// has not already been reminded of. Returns how many were inserted.
///
/// `today` is a parameter so callers (and tests) control the clock.
pub fn generate<B: StorageBackend>(
    backend: &B,
    student_id: &str,
    schedule: &[ScheduleEntry],
    today: NaiveDate,
) -> Result<usize> {
    let horizon = today + Duration::days(REMINDER_WINDOW_DAYS);
    let mut inserted = 0;

    for entry in schedule {
        // Strictly between today and the horizon.
        if entry.week <= today || entry.week >= horizon {
            continue;
        }
        let message = message_for(entry);
        if notifications::has_duplicate(backend, student_id, &message)? {
            continue;
        }
        notifications::add(
            backend,
            Notification::new(
                message,
                REMINDER_AUTHOR,
                NotificationKind::Alert,
                Some(student_id.to_string()),
            ),
        )?;
        inserted += 1;
    }

    Ok(inserted)
}
