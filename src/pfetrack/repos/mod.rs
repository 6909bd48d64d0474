//! Collection repositories: typed operations over the raw storage keys.
//!
//! One module per entity type, free functions generic over the backend.
//! Every mutation is an in-memory read-modify-write ending in one
//! write-back per affected collection; lookups return `Option` rather
//! than erroring on absence.

pub mod appointments;
pub mod documents;
pub mod notifications;
pub mod projects;
pub mod sheets;
pub mod users;
