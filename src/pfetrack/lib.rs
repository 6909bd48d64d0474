//! # pfetrack Architecture
//!
//! pfetrack is the **persistence core** of a PFE (end-of-studies project)
//! tracking portal. It is a UI-agnostic library that happens to ship a
//! small CLI client — not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI layer (args.rs, print.rs, wired by main.rs)            │
//! │  - Parses arguments, formats output, owns stdout/stderr     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API layer (api.rs)                                         │
//! │  - Thin facade over the repositories                        │
//! │  - Hosts cross-collection orchestration (profile sync,      │
//! │    booking + notifier)                                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository layer (repos/*.rs)                              │
//! │  - Typed per-collection operations, pure business logic     │
//! │  - Read-modify-write, one write-back per collection         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage layer (store/ + codec.rs)                          │
//! │  - StorageBackend trait: raw string key-value I/O           │
//! │  - FileBackend (production), MemBackend (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key properties
//!
//! - **Seed-if-absent**: [`init::init`] writes reference data only into
//!   missing keys; user-entered data is never overwritten, not even
//!   across upgrades.
//! - **Denormalized display copies**: student name/avatar are copied onto
//!   projects and appointments and re-pointed synchronously on every
//!   profile mutation.
//! - **Bounded notification history**: newest first, capped at 15.
//! - **Versioned backup envelope**: raw key strings exported/imported
//!   verbatim; import fails closed on malformed payloads.
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward, code takes plain arguments, returns plain
//! `Result` values, and never touches stdout, stderr or the process exit
//! code. Only the CLI layer knows it is running in a terminal.

pub mod api;
pub mod backup;
pub mod codec;
pub mod error;
pub mod init;
pub mod model;
pub mod notifier;
pub mod reminders;
pub mod repos;
pub mod seed;
pub mod store;
