//! String record repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist `(value, properties, created_at)` keyed by `value`.
//! - Provide lookup-by-value, bulk retrieval, insert and delete.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `value` uniqueness is enforced by the `UNIQUE` constraint, so
//!   concurrent inserts of the same value cannot both succeed.
//! - SQL prefiltering in `find_all` is an optimization only; every fetched
//!   record is still checked with `FilterSet::evaluate`.
//! - Read paths reject inconsistent persisted state instead of masking it.

use crate::db::DbError;
use crate::filter::predicate::FilterSet;
use crate::model::record::{PropertySet, StringRecord};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STRING_SELECT_SQL: &str = "SELECT
    value,
    sha256_hash,
    properties,
    created_at
FROM strings";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A record with this exact value already exists.
    Conflict(String),
    /// No record has this exact value.
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(_) => write!(f, "String already exists in the system"),
            Self::NotFound(_) => write!(f, "String does not exist in the system"),
            Self::InvalidData(message) => write!(f, "invalid persisted string data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Conflict(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for string records.
pub trait StringRepository {
    fn find_by_value(&self, value: &str) -> RepoResult<Option<StringRecord>>;
    /// Returns records in insertion order, restricted to `filter` when given.
    fn find_all(&self, filter: Option<&FilterSet>) -> RepoResult<Vec<StringRecord>>;
    fn insert(
        &self,
        value: &str,
        properties: &PropertySet,
        created_at: &str,
    ) -> RepoResult<StringRecord>;
    fn delete(&self, value: &str) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed string repository.
pub struct SqliteStringRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStringRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StringRepository for SqliteStringRepository<'_> {
    fn find_by_value(&self, value: &str) -> RepoResult<Option<StringRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STRING_SELECT_SQL} WHERE value = ?1;"))?;

        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_string_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, filter: Option<&FilterSet>) -> RepoResult<Vec<StringRecord>> {
        let mut sql = format!("{STRING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(filter) = filter {
            if let Some(word_count) = filter.word_count {
                sql.push_str(" AND word_count = ?");
                bind_values.push(Value::Integer(word_count));
            }
            if let Some(is_palindrome) = filter.is_palindrome {
                sql.push_str(" AND is_palindrome = ?");
                bind_values.push(Value::Integer(bool_to_int(is_palindrome)));
            }
            if let Some(min_length) = filter.min_length {
                sql.push_str(" AND length >= ?");
                bind_values.push(Value::Integer(min_length));
            }
            if let Some(max_length) = filter.max_length {
                sql.push_str(" AND length <= ?");
                bind_values.push(Value::Integer(max_length));
            }
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let record = parse_string_row(row)?;
            if filter.map_or(true, |filter| filter.evaluate(&record.properties)) {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn insert(
        &self,
        value: &str,
        properties: &PropertySet,
        created_at: &str,
    ) -> RepoResult<StringRecord> {
        let properties_json = serde_json::to_string(properties).map_err(|err| {
            RepoError::InvalidData(format!("failed to encode properties: {err}"))
        })?;

        let result = self.conn.execute(
            "INSERT INTO strings (
                value,
                sha256_hash,
                length,
                word_count,
                is_palindrome,
                properties,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                value,
                properties.sha256_hash.as_str(),
                i64::from(properties.length),
                i64::from(properties.word_count),
                bool_to_int(properties.is_palindrome),
                properties_json,
                created_at,
            ],
        );

        match result {
            Ok(_) => Ok(StringRecord {
                value: value.to_string(),
                properties: properties.clone(),
                created_at: created_at.to_string(),
            }),
            Err(err) if is_unique_violation(&err) => Err(RepoError::Conflict(value.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    fn delete(&self, value: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM strings WHERE value = ?1;", [value])?;

        if changed == 0 {
            return Err(RepoError::NotFound(value.to_string()));
        }

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM strings;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_string_row(row: &Row<'_>) -> RepoResult<StringRecord> {
    let value: String = row.get("value")?;

    let properties_text: String = row.get("properties")?;
    let properties = serde_json::from_str::<PropertySet>(&properties_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid properties JSON in strings.properties: {err}"))
    })?;

    let hash_column: String = row.get("sha256_hash")?;
    if hash_column != properties.sha256_hash {
        return Err(RepoError::InvalidData(format!(
            "strings.sha256_hash `{hash_column}` disagrees with properties hash `{}`",
            properties.sha256_hash
        )));
    }

    Ok(StringRecord {
        value,
        properties,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
