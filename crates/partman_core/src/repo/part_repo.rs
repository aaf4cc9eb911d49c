//! Part repository contract.
//!
//! # Responsibility
//! - Provide find-all, tag search, insert, update and delete over one
//!   collection of parts.
//! - Classify store failures as query or write errors.
//!
//! # Invariants
//! - Tag search uses AND semantics; an empty tag list applies no filter.
//! - `update_fields` replaces all four attributes in one store operation.
//! - Every operation is attempted exactly once.

use crate::db::StoreError;
use crate::model::part::{Part, PartFields, PartId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for part queries and writes.
#[derive(Debug)]
pub enum RepoError {
    /// Reading from the store failed (transport, malformed filter, decoding).
    Query(StoreError),
    /// Insert/update/delete failed.
    Write(StoreError),
    NotFound(PartId),
}

impl RepoError {
    pub fn query(err: impl Into<StoreError>) -> Self {
        Self::Query(err.into())
    }

    pub fn write(err: impl Into<StoreError>) -> Self {
        Self::Write(err.into())
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Query(_) => "query_failed",
            Self::Write(_) => "write_failed",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "part query failed: {err}"),
            Self::Write(err) => write!(f, "part write failed: {err}"),
            Self::NotFound(id) => write!(f, "part not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) | Self::Write(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

/// Repository interface for part CRUD operations.
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// Returns every part; order is decided by the store.
    async fn find_all(&self) -> RepoResult<Vec<Part>>;

    /// Returns parts carrying every tag in `tags`.
    ///
    /// An empty slice behaves like `find_all`.
    async fn find_by_tags(&self, tags: &[String]) -> RepoResult<Vec<Part>>;

    /// Gets one part by id.
    async fn get(&self, id: PartId) -> RepoResult<Option<Part>>;

    /// Inserts a new part under a freshly generated id and returns it.
    async fn insert(&self, fields: &PartFields) -> RepoResult<Part>;

    /// Sets all four attributes of `id` in a single update.
    ///
    /// Returns `NotFound` when no part has that id.
    async fn update_fields(&self, id: PartId, fields: &PartFields) -> RepoResult<()>;

    /// Deletes at most one part; returns whether one was removed.
    async fn delete_by_id(&self, id: PartId) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::RepoError;
    use crate::db::StoreError;
    use crate::model::part::PartId;

    #[test]
    fn codes_separate_query_write_and_missing() {
        let backend = || StoreError::Backend("down".to_string());
        assert_eq!(RepoError::query(backend()).code(), "query_failed");
        assert_eq!(RepoError::write(backend()).code(), "write_failed");
        assert_eq!(RepoError::NotFound(PartId::new()).code(), "not_found");
    }

    #[test]
    fn display_names_the_failed_operation() {
        let err = RepoError::write(StoreError::Backend("disk full".to_string()));
        assert_eq!(err.to_string(), "part write failed: disk full");
    }
}
