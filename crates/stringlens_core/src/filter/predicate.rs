//! Filter predicate set and evaluation.
//!
//! # Responsibility
//! - Represent the sparse, AND-combined filter over a `PropertySet`.
//! - Evaluate a filter against one already-materialized property set.
//! - Parse explicit key/value filter parameters.
//!
//! # Invariants
//! - Absent keys impose no constraint; an empty set matches everything.
//! - `contains_character` folds its argument with the frequency-map rule.

use crate::analysis::properties::frequency_chars;
use crate::model::record::PropertySet;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sparse set of recognized filter predicates.
///
/// Serializes with absent keys omitted, which is the shape reported back to
/// callers as `filters_applied` / `parsed_filters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

/// Explicit filter parameter that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParamError {
    pub parameter: String,
    pub value: String,
    pub expected: &'static str,
}

impl Display for FilterParamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value `{}` for query parameter `{}`: expected {}",
            self.value, self.parameter, self.expected
        )
    }
}

impl Error for FilterParamError {}

impl FilterSet {
    /// Returns whether no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.word_count.is_none()
            && self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.contains_character.is_none()
    }

    /// Returns true iff every present predicate holds for `properties`.
    pub fn evaluate(&self, properties: &PropertySet) -> bool {
        if let Some(word_count) = self.word_count {
            if i64::from(properties.word_count) != word_count {
                return false;
            }
        }
        if let Some(is_palindrome) = self.is_palindrome {
            if properties.is_palindrome != is_palindrome {
                return false;
            }
        }
        if let Some(min_length) = self.min_length {
            if i64::from(properties.length) < min_length {
                return false;
            }
        }
        if let Some(max_length) = self.max_length {
            if i64::from(properties.length) > max_length {
                return false;
            }
        }
        if let Some(character) = self.contains_character.as_deref() {
            if !contains_character(properties, character) {
                return false;
            }
        }
        true
    }

    /// Builds a filter from explicit `(key, value)` parameters.
    ///
    /// Unknown keys are ignored. A repeated key keeps its last value.
    ///
    /// # Errors
    /// - Returns [`FilterParamError`] when a recognized key has a value of
    ///   the wrong shape.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, FilterParamError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        for (key, value) in params {
            let key = key.as_ref();
            let value = value.as_ref();
            match key {
                "is_palindrome" => filters.is_palindrome = Some(parse_bool_param(key, value)?),
                "min_length" => filters.min_length = Some(parse_int_param(key, value)?),
                "max_length" => filters.max_length = Some(parse_int_param(key, value)?),
                "word_count" => filters.word_count = Some(parse_int_param(key, value)?),
                "contains_character" => filters.contains_character = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(filters)
    }
}

/// Free-function form of [`FilterSet::evaluate`].
pub fn evaluate(filters: &FilterSet, properties: &PropertySet) -> bool {
    filters.evaluate(properties)
}

fn contains_character(properties: &PropertySet, requested: &str) -> bool {
    let mut folded = frequency_chars(requested);
    // Map keys are single chars; anything folding to zero or several chars
    // can never be a key.
    match (folded.next(), folded.next()) {
        (Some(c), None) => properties
            .character_frequency_map
            .get(&c)
            .is_some_and(|count| *count > 0),
        _ => false,
    }
}

fn parse_bool_param(key: &str, value: &str) -> Result<bool, FilterParamError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(FilterParamError {
            parameter: key.to_string(),
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}

/// Parses a signed integer, clamping digit runs that overflow `i64`.
fn parse_int_param(key: &str, value: &str) -> Result<i64, FilterParamError> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(parsed);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }

    Err(FilterParamError {
        parameter: key.to_string(),
        value: value.to_string(),
        expected: "an integer",
    })
}
