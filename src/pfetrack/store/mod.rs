//! # Storage Layer
//!
//! This module defines the raw persistence boundary for the portal. The
//! [`StorageBackend`] trait is a plain string key-value contract; every
//! logical collection occupies exactly one key and is always read then
//! fully rewritten, never patched at sub-key granularity.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemBackend` (no filesystem needed)
//! - Allow **future backends** without changing repositories
//! - Keep business logic **decoupled** from persistence details
//!
//! The trait carries no business logic and no content transformation —
//! encoding/decoding lives in [`crate::codec`].
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production storage, one JSON file per key under
//!   a data directory. Writes are atomic (tmp + rename).
//! - [`memory::MemBackend`]: in-memory storage for tests, with write-error
//!   simulation.
//!
//! ## Storage Layout
//!
//! For `FileBackend`:
//! ```text
//! <data-dir>/
//! ├── projects.json        # JSON array of Project
//! ├── appointments.json    # JSON array of Appointment
//! ├── notifications.json   # JSON array of Notification, newest first, max 15
//! ├── fiches.json          # JSON object: project id → TrackingSheet
//! └── users.json           # JSON array of User
//! ```
//!
//! ## Consistency Model
//!
//! Single-process, synchronous, call-ordered. Each `set` replaces one key
//! atomically; multi-step operations are in-memory read-modify-write
//! sequences ending in one write per affected collection. There is NO
//! cross-process locking: two processes sharing a data directory can lose
//! updates (last-write-wins at the granularity of a whole collection's
//! encoded string). This is accepted, documented behavior of the portal's
//! deployment model — do not "fix" it with locking, which would change
//! observable semantics.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Logical key names, one per collection.
///
/// `fiches` is the historical name of the tracking-sheet key and is fixed
/// by the backup envelope format.
pub mod keys {
    pub const PROJECTS: &str = "projects";
    pub const APPOINTMENTS: &str = "appointments";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const SHEETS: &str = "fiches";
    pub const USERS: &str = "users";
}

/// Abstract interface for raw storage I/O.
///
/// Implementations store opaque strings; `set` must signal failure rather
/// than silently dropping data.
pub trait StorageBackend {
    /// Read the raw value at a key. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value at a key. The replacement is atomic per key.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
