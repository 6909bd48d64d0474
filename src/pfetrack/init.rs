//! Store initialization: seed-if-absent.
//!
//! `init` writes seed data only when a key is completely missing. Existing
//! data is never overwritten, even across application upgrades — the
//! policy favors durability of user-entered data over keeping demo data in
//! sync with code changes. Corrupt-but-present data is likewise left in
//! place: reads of that key fail with [`crate::error::StoreError::Corrupt`]
//! until an operator clears or re-imports it.

use serde::Serialize;
use tracing::info;

use crate::codec;
use crate::error::Result;
use crate::model::Notification;
use crate::seed::SeedRegistry;
use crate::store::{keys, StorageBackend};

/// Idempotent. Safe to call on every startup; repeat calls are no-ops
/// once the keys exist. The users key is left unmanaged — callers
/// populate it lazily on first profile mutation.
pub fn init<B: StorageBackend>(backend: &B, seed: &SeedRegistry) -> Result<()> {
    seed_if_absent(backend, keys::PROJECTS, &seed.projects)?;
    seed_if_absent(backend, keys::APPOINTMENTS, &seed.appointments)?;
    seed_if_absent(backend, keys::NOTIFICATIONS, &Vec::<Notification>::new())?;
    Ok(())
}

fn seed_if_absent<T: Serialize, B: StorageBackend>(
    backend: &B,
    key: &'static str,
    value: &T,
) -> Result<()> {
    if backend.get(key)?.is_none() {
        info!(key, "seeding absent key");
        codec::store(backend, key, value)?;
    }
    Ok(())
}
