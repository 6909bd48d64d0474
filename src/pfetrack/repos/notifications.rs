use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::model::Notification;
use crate::store::{keys, StorageBackend};

/// Bounded history length; the oldest excess entries are discarded.
pub const MAX_STORED: usize = 15;

/// All stored notifications, newest first.
pub fn all<B: StorageBackend>(backend: &B) -> Result<Vec<Notification>> {
    codec::load_vec(backend, keys::NOTIFICATIONS)
}

/// Active notifications visible to a student: broadcasts plus their
/// personal ones.
pub fn for_student<B: StorageBackend>(
    backend: &B,
    student_id: &str,
) -> Result<Vec<Notification>> {
    Ok(all(backend)?
        .into_iter()
        .filter(|n| n.active)
        .filter(|n| match &n.student_id {
            Some(owner) => owner == student_id,
            None => true,
        })
        .collect())
}

/// Prepend a notification and truncate the history to [`MAX_STORED`].
pub fn add<B: StorageBackend>(backend: &B, notification: Notification) -> Result<()> {
    let mut stored = all(backend)?;
    stored.insert(0, notification);
    stored.truncate(MAX_STORED);
    codec::store(backend, keys::NOTIFICATIONS, &stored)
}

/// Broadcast-scoped dismissal: the record is kept, only deactivated.
/// Returns false for an unknown id.
pub fn deactivate<B: StorageBackend>(backend: &B, id: &str) -> Result<bool> {
    let mut stored = all(backend)?;
    let Some(notification) = stored.iter_mut().find(|n| n.id == id) else {
        return Ok(false);
    };
    notification.active = false;
    codec::store(backend, keys::NOTIFICATIONS, &stored)?;
    Ok(true)
}

/// Hard-delete a single record. Returns false for an unknown id.
pub fn purge<B: StorageBackend>(backend: &B, id: &str) -> Result<bool> {
    let mut stored = all(backend)?;
    let before = stored.len();
    stored.retain(|n| n.id != id);
    if stored.len() == before {
        return Ok(false);
    }
    codec::store(backend, keys::NOTIFICATIONS, &stored)?;
    Ok(true)
}

/// Empty the entire collection. Irreversible.
pub fn clear_all<B: StorageBackend>(backend: &B) -> Result<()> {
    debug!("clearing notification history");
    codec::store(backend, keys::NOTIFICATIONS, &Vec::<Notification>::new())
}

/// True when a personal notification with this exact message already
/// exists for the student. Supports idempotent reminder generation.
pub fn has_duplicate<B: StorageBackend>(
    backend: &B,
    student_id: &str,
    message: &str,
) -> Result<bool> {
    Ok(all(backend)?
        .iter()
        .any(|n| n.student_id.as_deref() == Some(student_id) && n.message == message))
}
