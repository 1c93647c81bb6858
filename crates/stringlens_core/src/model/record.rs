//! String record domain model.
//!
//! # Responsibility
//! - Define the stored record and its derived property snapshot.
//! - Expose the content hash as the public record identity.
//!
//! # Invariants
//! - `properties` is a pure function of `value`.
//! - `created_at` is assigned once, in UTC, and never rewritten.
//! - External identity is `properties.sha256_hash`, never a storage row id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public identifier of a record: lowercase hex SHA-256 of its value.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContentHash = String;

/// Derived attributes computed from a string's content.
///
/// Field names match the external JSON schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    /// Character count after trimming outer whitespace.
    pub length: u32,
    /// Alphanumeric-only, case-folded symmetry.
    pub is_palindrome: bool,
    /// Distinct case-folded non-whitespace characters.
    pub unique_characters: u32,
    /// Whitespace-delimited token count.
    pub word_count: u32,
    /// Content hash of the raw UTF-8 value.
    pub sha256_hash: ContentHash,
    /// Occurrences per case-folded non-whitespace character.
    pub character_frequency_map: BTreeMap<char, u32>,
}

/// Stored string with its frozen property snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Original submitted text, verbatim.
    pub value: String,
    pub properties: PropertySet,
    /// RFC 3339 UTC timestamp, e.g. `2025-01-01T12:00:00.000000+00:00`.
    pub created_at: String,
}

impl StringRecord {
    /// Returns the public identifier (content hash) of this record.
    pub fn id(&self) -> &str {
        self.properties.sha256_hash.as_str()
    }
}
