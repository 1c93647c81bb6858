//! API error taxonomy and status mapping.
//!
//! Every error kind maps to exactly one HTTP status.

use crate::filter::predicate::FilterParamError;
use crate::service::string_service::ServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Client-visible failure of an API operation.
#[derive(Debug)]
pub enum ApiError {
    /// Request payload or parameter is malformed.
    Validation(String),
    Conflict,
    NotFound,
    UntranslatableQuery,
    /// Storage or encoding failure; details are logged, not returned.
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::Conflict => 409,
            Self::NotFound => 404,
            Self::UntranslatableQuery => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Message returned to the client as `detail`.
    pub fn detail(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::Conflict => write!(f, "String already exists in the system"),
            Self::NotFound => write!(f, "String does not exist in the system"),
            Self::UntranslatableQuery => write!(f, "Unable to parse natural language query"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Conflict(_) => Self::Conflict,
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::UntranslatableQuery(_) => Self::UntranslatableQuery,
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<FilterParamError> for ApiError {
    fn from(value: FilterParamError) -> Self {
        Self::Validation(value.to_string())
    }
}
