//! Core domain logic for StringLens.
//! This crate is the single source of truth for string analysis, filter
//! semantics and the record store contract.

pub mod analysis;
pub mod api;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use analysis::identity::content_hash;
pub use analysis::properties::analyze;
pub use api::{ApiError, ApiResponse, StringApi};
pub use filter::natural_language::{interpret, translate, InterpretedQuery, TranslateError};
pub use filter::predicate::{evaluate, FilterParamError, FilterSet};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{ContentHash, PropertySet, StringRecord};
pub use repo::string_repo::{RepoError, RepoResult, SqliteStringRepository, StringRepository};
pub use service::string_service::{
    FilteredList, NaturalLanguageList, ServiceError, StringService,
};
