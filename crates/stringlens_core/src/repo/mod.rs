//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract the core needs.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`Conflict`, `NotFound`) in
//!   addition to DB transport errors.

pub mod string_repo;
