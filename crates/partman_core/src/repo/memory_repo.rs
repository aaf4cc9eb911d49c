//! In-process part repository.
//!
//! # Responsibility
//! - Mirror the store's filter and update semantics without a server.
//! - Allow query/write failures to be injected for error-path tests.
//!
//! # Invariants
//! - Listing order is insertion order.
//! - Injected failures surface as `RepoError::Query` / `RepoError::Write`
//!   exactly like driver failures.

use crate::db::StoreError;
use crate::model::part::{Part, PartFields, PartId};
use crate::repo::part_repo::{PartRepository, RepoError, RepoResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Repository holding parts in memory.
#[derive(Default)]
pub struct InMemoryPartRepository {
    parts: Mutex<Vec<Part>>,
    fail_queries: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryPartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with existing records.
    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self {
            parts: Mutex::new(parts),
            ..Self::default()
        }
    }

    /// Makes every subsequent read fail until reset.
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().map(|parts| parts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Part>>, StoreError> {
        self.parts
            .lock()
            .map_err(|_| StoreError::Backend("in-memory part store lock poisoned".to_string()))
    }

    fn read(&self) -> RepoResult<MutexGuard<'_, Vec<Part>>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(RepoError::query(injected("query")));
        }
        self.lock().map_err(RepoError::query)
    }

    fn write(&self) -> RepoResult<MutexGuard<'_, Vec<Part>>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::write(injected("write")));
        }
        self.lock().map_err(RepoError::write)
    }
}

fn injected(kind: &str) -> StoreError {
    StoreError::Backend(format!("injected {kind} failure"))
}

#[async_trait]
impl PartRepository for InMemoryPartRepository {
    async fn find_all(&self) -> RepoResult<Vec<Part>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_tags(&self, tags: &[String]) -> RepoResult<Vec<Part>> {
        let parts = self.read()?;
        Ok(parts
            .iter()
            .filter(|part| part.has_all_tags(tags))
            .cloned()
            .collect())
    }

    async fn get(&self, id: PartId) -> RepoResult<Option<Part>> {
        Ok(self.read()?.iter().find(|part| part.id == id).cloned())
    }

    async fn insert(&self, fields: &PartFields) -> RepoResult<Part> {
        let part = Part::new(fields.clone());
        let mut parts = self.write()?;
        if parts.iter().any(|existing| existing.id == part.id) {
            return Err(RepoError::write(StoreError::Backend(format!(
                "duplicate part id {}",
                part.id
            ))));
        }
        parts.push(part.clone());
        Ok(part)
    }

    async fn update_fields(&self, id: PartId, fields: &PartFields) -> RepoResult<()> {
        let mut parts = self.write()?;
        match parts.iter_mut().find(|part| part.id == id) {
            Some(part) => {
                part.apply(fields.clone());
                Ok(())
            }
            None => Err(RepoError::NotFound(id)),
        }
    }

    async fn delete_by_id(&self, id: PartId) -> RepoResult<bool> {
        let mut parts = self.write()?;
        match parts.iter().position(|part| part.id == id) {
            Some(index) => {
                parts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
