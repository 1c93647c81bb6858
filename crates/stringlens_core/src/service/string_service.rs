//! String analysis use-case service.
//!
//! # Responsibility
//! - Analyze and store new strings with a frozen property snapshot.
//! - Serve lookups, explicit-filter listings and natural-language listings.
//! - Translate repository errors into use-case errors.
//!
//! # Invariants
//! - A duplicate `value` is refused before analysis and leaves the stored
//!   record untouched.
//! - An untranslatable natural-language query is an error, never a
//!   match-all listing.
//! - Log events carry lengths and counts only, never string content.

use crate::analysis::properties::analyze;
use crate::filter::natural_language::{interpret, InterpretedQuery, TranslateError};
use crate::filter::predicate::FilterSet;
use crate::model::record::StringRecord;
use crate::repo::string_repo::{RepoError, StringRepository};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for string use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A record with this value already exists.
    Conflict(String),
    /// No record has this value.
    NotFound(String),
    /// The natural-language query matched no known pattern.
    UntranslatableQuery(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(_) => write!(f, "String already exists in the system"),
            Self::NotFound(_) => write!(f, "String does not exist in the system"),
            Self::UntranslatableQuery(_) => write!(f, "Unable to parse natural language query"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Conflict(value) => Self::Conflict(value),
            RepoError::NotFound(value) => Self::NotFound(value),
            other => Self::Repo(other),
        }
    }
}

impl From<TranslateError> for ServiceError {
    fn from(value: TranslateError) -> Self {
        match value {
            TranslateError::Untranslatable { query } => Self::UntranslatableQuery(query),
        }
    }
}

/// Listing produced from explicit filter parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredList {
    /// Matching records in insertion order.
    pub records: Vec<StringRecord>,
    pub filters_applied: FilterSet,
}

/// Listing produced from a natural-language query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalLanguageList {
    /// Matching records in insertion order.
    pub records: Vec<StringRecord>,
    pub interpreted_query: InterpretedQuery,
}

/// String service facade over repository implementations.
pub struct StringService<R: StringRepository> {
    repo: R,
}

impl<R: StringRepository> StringService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Analyzes `value` and stores it with the current UTC timestamp.
    ///
    /// # Errors
    /// - [`ServiceError::Conflict`] when `value` is already stored.
    pub fn create(&self, value: &str) -> Result<StringRecord, ServiceError> {
        if self.repo.find_by_value(value)?.is_some() {
            warn!(
                "event=string_create module=service status=conflict value_len={}",
                value.len()
            );
            return Err(ServiceError::Conflict(value.to_string()));
        }

        let properties = analyze(value);
        let record = self.repo.insert(value, &properties, &now_timestamp())?;
        info!(
            "event=string_create module=service status=ok length={} word_count={}",
            record.properties.length, record.properties.word_count
        );
        Ok(record)
    }

    /// Gets one record by exact value.
    ///
    /// # Errors
    /// - [`ServiceError::NotFound`] when no record has `value`.
    pub fn get(&self, value: &str) -> Result<StringRecord, ServiceError> {
        self.repo
            .find_by_value(value)?
            .ok_or_else(|| ServiceError::NotFound(value.to_string()))
    }

    /// Lists records matching every predicate in `filters`.
    ///
    /// An empty filter set lists every record.
    pub fn list(&self, filters: &FilterSet) -> Result<FilteredList, ServiceError> {
        let records = self.repo.find_all(Some(filters))?;
        info!(
            "event=string_list module=service status=ok mode=explicit count={}",
            records.len()
        );
        Ok(FilteredList {
            records,
            filters_applied: filters.clone(),
        })
    }

    /// Translates `query` and lists the records matching the result.
    ///
    /// # Errors
    /// - [`ServiceError::UntranslatableQuery`] when no pattern fires.
    pub fn filter_by_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageList, ServiceError> {
        let interpreted_query = match interpret(query) {
            Ok(interpreted) => interpreted,
            Err(err) => {
                warn!(
                    "event=string_query module=service status=untranslatable query_len={}",
                    query.len()
                );
                return Err(err.into());
            }
        };

        let records = self
            .repo
            .find_all(Some(&interpreted_query.parsed_filters))?;
        info!(
            "event=string_list module=service status=ok mode=natural_language count={}",
            records.len()
        );
        Ok(NaturalLanguageList {
            records,
            interpreted_query,
        })
    }

    /// Deletes one record by exact value.
    ///
    /// # Errors
    /// - [`ServiceError::NotFound`] when no record has `value`.
    pub fn delete(&self, value: &str) -> Result<(), ServiceError> {
        self.repo.delete(value)?;
        info!("event=string_delete module=service status=ok");
        Ok(())
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.repo.count()?)
    }
}

/// Current UTC time as RFC 3339 with microseconds and a `+00:00` offset.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
