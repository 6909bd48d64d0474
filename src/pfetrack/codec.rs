//! Entity codec: the translation between a collection's typed value and
//! the raw string a [`StorageBackend`] key holds.
//!
//! An absent key decodes to the collection's defined empty value. A
//! present-but-malformed value surfaces as [`StoreError::Corrupt`]
//! carrying the offending key; it is never silently repaired.

use crate::error::{Result, StoreError};
use crate::store::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Decode a JSON-array collection. Absent raw → empty vec.
pub fn decode_vec<T: DeserializeOwned>(key: &'static str, raw: Option<&str>) -> Result<Vec<T>> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => {
            serde_json::from_str(raw).map_err(|source| StoreError::Corrupt { key, source })
        }
    }
}

/// Decode a JSON-object collection keyed by entity id. Absent raw → empty
/// map. `BTreeMap` keeps the encoded form stable across rewrites.
pub fn decode_map<T: DeserializeOwned>(
    key: &'static str,
    raw: Option<&str>,
) -> Result<BTreeMap<String, T>> {
    match raw {
        None => Ok(BTreeMap::new()),
        Some(raw) => {
            serde_json::from_str(raw).map_err(|source| StoreError::Corrupt { key, source })
        }
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Read-through: fetch a key and decode it as an array collection.
pub fn load_vec<T: DeserializeOwned, B: StorageBackend>(
    backend: &B,
    key: &'static str,
) -> Result<Vec<T>> {
    let raw = backend.get(key)?;
    decode_vec(key, raw.as_deref())
}

/// Read-through: fetch a key and decode it as an id-keyed map.
pub fn load_map<T: DeserializeOwned, B: StorageBackend>(
    backend: &B,
    key: &'static str,
) -> Result<BTreeMap<String, T>> {
    let raw = backend.get(key)?;
    decode_map(key, raw.as_deref())
}

/// Write-back: encode a collection and replace its key in one set.
pub fn store<T: Serialize, B: StorageBackend>(
    backend: &B,
    key: &'static str,
    value: &T,
) -> Result<()> {
    backend.set(key, &encode(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Notification;

    #[test]
    fn test_absent_decodes_to_empty() {
        let vec: Vec<Notification> = decode_vec("notifications", None).unwrap();
        assert!(vec.is_empty());

        let map: BTreeMap<String, u32> = decode_map("fiches", None).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_corrupt_raw_names_the_key() {
        let err = decode_vec::<Notification>("notifications", Some("{not json")).unwrap_err();
        match err {
            StoreError::Corrupt { key, .. } => assert_eq!(key, "notifications"),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_corrupt_too() {
        // Valid JSON, wrong collection shape.
        let err = decode_vec::<Notification>("notifications", Some("{\"a\": 1}")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let values = vec![1u32, 2, 3];
        let raw = encode(&values).unwrap();
        let back: Vec<u32> = decode_vec("projects", Some(&raw)).unwrap();
        assert_eq!(back, values);
    }
}
