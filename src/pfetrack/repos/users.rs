use crate::codec;
use crate::error::Result;
use crate::model::{ProfileUpdate, User};
use crate::store::{keys, StorageBackend};

/// The users key is never seeded by `init`; it fills lazily on first
/// profile mutation, separate from any hardcoded directory the portal's
/// auth layer may consult.
pub fn all<B: StorageBackend>(backend: &B) -> Result<Vec<User>> {
    codec::load_vec(backend, keys::USERS)
}

pub fn find<B: StorageBackend>(backend: &B, id: &str) -> Result<Option<User>> {
    Ok(all(backend)?.into_iter().find(|u| u.id == id))
}

/// Insert if the id is unseen, full replace otherwise.
pub fn upsert<B: StorageBackend>(backend: &B, user: User) -> Result<()> {
    let mut users = all(backend)?;
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(slot) => *slot = user,
        None => users.push(user),
    }
    codec::store(backend, keys::USERS, &users)
}

/// Apply a partial profile mutation and persist it. Returns the updated
/// user, or `None` when the id is unknown here (the denormalization sync
/// still applies in that case — projects can reference students whose
/// profile was never stored).
pub fn update_profile<B: StorageBackend>(
    backend: &B,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<Option<User>> {
    let mut users = all(backend)?;
    let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
        return Ok(None);
    };
    if let Some(name) = &update.name {
        user.name = name.clone();
    }
    if let Some(avatar) = &update.avatar {
        user.avatar = Some(avatar.clone());
    }
    let updated = user.clone();
    codec::store(backend, keys::USERS, &users)?;
    Ok(Some(updated))
}
