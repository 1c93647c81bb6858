//! Filter model and natural-language translation.
//!
//! # Responsibility
//! - Define the structured filter evaluated against stored properties.
//! - Translate fixed natural-language phrases into that structure.

pub mod natural_language;
pub mod predicate;
