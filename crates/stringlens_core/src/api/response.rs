//! Response envelopes returned by the API facade.

use crate::filter::natural_language::InterpretedQuery;
use crate::filter::predicate::FilterSet;
use crate::model::record::{PropertySet, StringRecord};
use serde::{Deserialize, Serialize};

/// Public record shape. `id` is the content hash, never a row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub value: String,
    pub properties: PropertySet,
    pub created_at: String,
}

impl From<StringRecord> for RecordResponse {
    fn from(record: StringRecord) -> Self {
        Self {
            id: record.id().to_string(),
            value: record.value,
            properties: record.properties,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredListResponse {
    pub data: Vec<RecordResponse>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalLanguageListResponse {
    pub data: Vec<RecordResponse>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
