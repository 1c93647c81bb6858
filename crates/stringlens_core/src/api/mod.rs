//! Transport-agnostic API facade.
//!
//! # Responsibility
//! - Validate request payloads before they reach analysis or storage.
//! - Shape records and listings into the public JSON envelopes.
//! - Map every error kind to exactly one HTTP status.
//!
//! # Invariants
//! - Operations never panic; failures become an `ApiResponse` with a
//!   `{"detail": ...}` body.
//! - Successful creation is `201`, deletion is `204` with no body.

pub mod error;
pub mod response;

pub use error::ApiError;
pub use response::{
    ErrorResponse, FilteredListResponse, NaturalLanguageListResponse, RecordResponse,
};

use crate::filter::predicate::FilterSet;
use crate::repo::string_repo::SqliteStringRepository;
use crate::service::string_service::StringService;
use log::error;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Analysis request body: `{"value": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyzeRequest {
    pub value: String,
}

impl AnalyzeRequest {
    /// Parses and validates a raw JSON body.
    ///
    /// # Errors
    /// - [`ApiError::Validation`] for malformed JSON, a missing `value`, or a
    ///   non-string `value`.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str::<Self>(body)
            .map_err(|err| ApiError::Validation(format!("invalid request body: {err}")))
    }
}

/// Status plus optional JSON body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn json(status: u16, payload: &impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self {
                status,
                body: Some(body),
            },
            Err(err) => Self::from_error(&ApiError::Internal(format!(
                "failed to encode response: {err}"
            ))),
        }
    }

    fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    fn from_error(err: &ApiError) -> Self {
        if let ApiError::Internal(message) = err {
            error!(
                "event=api_request module=api status=error error_code=internal error={}",
                message
            );
        }
        Self {
            status: err.status(),
            body: Some(serde_json::json!({ "detail": err.detail() })),
        }
    }

    /// Returns whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// API facade over one explicitly opened store connection.
pub struct StringApi<'conn> {
    service: StringService<SqliteStringRepository<'conn>>,
}

impl<'conn> StringApi<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            service: StringService::new(SqliteStringRepository::new(conn)),
        }
    }

    /// `POST /strings` with a JSON body.
    pub fn create_string(&self, body: &str) -> ApiResponse {
        let result = AnalyzeRequest::from_json(body).and_then(|request| {
            self.service
                .create(&request.value)
                .map(RecordResponse::from)
                .map_err(ApiError::from)
        });
        match result {
            Ok(record) => ApiResponse::json(201, &record),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `GET /strings/{value}`.
    pub fn get_string(&self, value: &str) -> ApiResponse {
        match self.service.get(value) {
            Ok(record) => ApiResponse::json(200, &RecordResponse::from(record)),
            Err(err) => ApiResponse::from_error(&ApiError::from(err)),
        }
    }

    /// `GET /strings` with explicit filter query parameters.
    pub fn list_strings<I, K, V>(&self, params: I) -> ApiResponse
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let result = FilterSet::from_params(params)
            .map_err(ApiError::from)
            .and_then(|filters| self.service.list(&filters).map_err(ApiError::from));
        match result {
            Ok(listing) => {
                let data = listing
                    .records
                    .into_iter()
                    .map(RecordResponse::from)
                    .collect::<Vec<_>>();
                ApiResponse::json(
                    200,
                    &FilteredListResponse {
                        count: data.len(),
                        data,
                        filters_applied: listing.filters_applied,
                    },
                )
            }
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `GET /strings/filter-by-natural-language?query=...`.
    pub fn filter_by_natural_language(&self, query: &str) -> ApiResponse {
        match self.service.filter_by_natural_language(query) {
            Ok(listing) => {
                let data = listing
                    .records
                    .into_iter()
                    .map(RecordResponse::from)
                    .collect::<Vec<_>>();
                ApiResponse::json(
                    200,
                    &NaturalLanguageListResponse {
                        count: data.len(),
                        data,
                        interpreted_query: listing.interpreted_query,
                    },
                )
            }
            Err(err) => ApiResponse::from_error(&ApiError::from(err)),
        }
    }

    /// `DELETE /strings/{value}`.
    pub fn delete_string(&self, value: &str) -> ApiResponse {
        match self.service.delete(value) {
            Ok(()) => ApiResponse::empty(204),
            Err(err) => ApiResponse::from_error(&ApiError::from(err)),
        }
    }
}
