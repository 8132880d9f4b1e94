//! Domain model for the music catalog.
//!
//! # Responsibility
//! - Define the canonical `Music` record shared by every storage backend.
//! - Define the replacement payload used by update-by-name.
//!
//! # Invariants
//! - Every stored record carries a non-empty, server-generated `id`.
//! - `id` never changes after creation.

pub mod music;
