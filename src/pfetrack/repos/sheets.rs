use std::collections::BTreeMap;

use crate::codec;
use crate::error::Result;
use crate::model::TrackingSheet;
use crate::store::{keys, StorageBackend};

/// Tracking sheets are keyed by project id — one sheet per project, not a
/// flat list with independent ids. Building the six-checkpoint default
/// structure on first access is the caller's responsibility
/// ([`TrackingSheet::new`]); this repository only stores what it is given.
pub fn all<B: StorageBackend>(backend: &B) -> Result<BTreeMap<String, TrackingSheet>> {
    codec::load_map(backend, keys::SHEETS)
}

pub fn find_by_project<B: StorageBackend>(
    backend: &B,
    project_id: &str,
) -> Result<Option<TrackingSheet>> {
    Ok(all(backend)?.remove(project_id))
}

/// Replace the entry at the sheet's project id.
pub fn save<B: StorageBackend>(backend: &B, sheet: TrackingSheet) -> Result<()> {
    let mut sheets = all(backend)?;
    sheets.insert(sheet.project_id.clone(), sheet);
    codec::store(backend, keys::SHEETS, &sheets)
}
