//! Domain model for analyzed string records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted record shape identical to the API record shape.
//!
//! # Invariants
//! - A record's `value` is unique across the store.
//! - Properties are derived once at creation and never mutated.

pub mod record;
