//! Backup/restore engine.
//!
//! Export serializes the raw encoded string of each collection key into a
//! versioned envelope; import validates the envelope and replaces keys
//! verbatim. Because the raw strings are carried untouched (never
//! re-parsed into entities), an export/import round-trip is byte-for-byte
//! when nothing mutates in between.
//!
//! The engine reads and writes the adapter keys directly, bypassing
//! repository-level decoding on purpose: a backup of a corrupt collection
//! is still a faithful backup.
//!
//! Import is atomic per key but not across keys — a crash between two key
//! writes can leave collections mutually inconsistent. Accepted for the
//! portal's single-user, client-only deployment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::store::{keys, StorageBackend};

pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: String,
    timestamp: DateTime<Utc>,
    storage: StorageSection,
}

/// Raw encoded strings per key. Users are intentionally excluded:
/// profile/credential data never leaves the device through a backup.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    projects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    appointments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fiches: Option<String>,
}

/// Serialize the current store state into the backup envelope. Keys the
/// adapter reports absent are omitted from the payload.
pub fn export<B: StorageBackend>(backend: &B) -> Result<String> {
    let storage = StorageSection {
        projects: backend.get(keys::PROJECTS)?,
        appointments: backend.get(keys::APPOINTMENTS)?,
        notifications: backend.get(keys::NOTIFICATIONS)?,
        fiches: backend.get(keys::SHEETS)?,
    };
    let envelope = Envelope {
        version: FORMAT_VERSION.to_string(),
        timestamp: Utc::now(),
        storage,
    };
    info!("exported store snapshot");
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Restore collections from a backup payload.
///
/// Fails closed: `Ok(false)` with zero writes when the payload is not
/// JSON or lacks the `storage` field. On success each field present in
/// the payload overwrites its key verbatim; absent fields leave their
/// keys untouched, so a partial payload is a partial import. Backend
/// write failures propagate as errors.
pub fn import<B: StorageBackend>(backend: &B, payload: &str) -> Result<bool> {
    #[derive(Deserialize)]
    struct Incoming {
        #[serde(default)]
        storage: Option<StorageSection>,
    }

    let incoming: Incoming = match serde_json::from_str(payload) {
        Ok(incoming) => incoming,
        Err(error) => {
            warn!(%error, "rejected backup payload");
            return Ok(false);
        }
    };
    let Some(storage) = incoming.storage else {
        warn!("rejected backup payload: no storage field");
        return Ok(false);
    };

    let entries = [
        (keys::PROJECTS, storage.projects),
        (keys::APPOINTMENTS, storage.appointments),
        (keys::NOTIFICATIONS, storage.notifications),
        (keys::SHEETS, storage.fiches),
    ];
    for (key, raw) in entries {
        if let Some(raw) = raw {
            backend.set(key, &raw)?;
        }
    }

    info!("imported store snapshot");
    Ok(true)
}
