//! Pure string analysis.
//!
//! # Responsibility
//! - Derive the fixed property set from raw text.
//! - Provide stable content addressing for records.
//!
//! # Invariants
//! - Every function here is total, synchronous and side-effect free.

pub mod identity;
pub mod properties;
