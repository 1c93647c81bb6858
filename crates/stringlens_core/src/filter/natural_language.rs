//! Fixed-pattern natural-language filter translator.
//!
//! # Responsibility
//! - Map a free-text phrase to a `FilterSet` through four independent,
//!   case-sensitive checks over the raw phrase.
//!
//! # Invariants
//! - Checks never depend on each other; order does not change the result.
//! - "longer than N characters" yields `min_length = N + 1`, saturating at
//!   `i64::MAX` for bounds too large to represent.
//! - A phrase that fires no check is an error, never "match all".

use crate::filter::predicate::FilterSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static LONGER_THAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"longer than ([0-9]+) characters").expect("valid longer-than regex")
});
static CONTAINING_LETTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"containing the letter (\w)").expect("valid containing-letter regex")
});

/// Translation failure for natural-language queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// No fixed pattern matched the phrase.
    Untranslatable { query: String },
}

impl Display for TranslateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untranslatable { .. } => write!(f, "Unable to parse natural language query"),
        }
    }
}

impl Error for TranslateError {}

/// Original phrase paired with the filters it was translated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Translates `query` into a filter set.
///
/// # Errors
/// - Returns [`TranslateError::Untranslatable`] when no pattern fires.
pub fn translate(query: &str) -> Result<FilterSet, TranslateError> {
    let mut filters = FilterSet::default();

    if query.contains("single word") {
        filters.word_count = Some(1);
    }
    if query.contains("palindromic") {
        filters.is_palindrome = Some(true);
    }
    if let Some(captures) = LONGER_THAN_RE.captures(query) {
        // The digit run only fails to parse on overflow; saturate so the
        // rule still fires and matches nothing.
        filters.min_length = Some(
            captures[1]
                .parse::<i64>()
                .map_or(i64::MAX, |bound| bound.saturating_add(1)),
        );
    }
    if let Some(captures) = CONTAINING_LETTER_RE.captures(query) {
        filters.contains_character = Some(captures[1].to_string());
    }

    if filters.is_empty() {
        return Err(TranslateError::Untranslatable {
            query: query.to_string(),
        });
    }
    Ok(filters)
}

/// Translates `query` and keeps the original phrase alongside the result.
pub fn interpret(query: &str) -> Result<InterpretedQuery, TranslateError> {
    Ok(InterpretedQuery {
        original: query.to_string(),
        parsed_filters: translate(query)?,
    })
}
