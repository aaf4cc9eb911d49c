//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide list/search/create/save/delete entry points for screens.
//! - Own search-box and form parsing semantics.
//! - Log every query/write outcome to the diagnostic stream.
//!
//! # Invariants
//! - Blank search text lists the full catalog.
//! - Saving never changes a part's id.
//! - Failures are logged once here and returned unchanged; nothing is retried.

use crate::model::form::{parse_tags, PartForm};
use crate::model::part::{Part, PartId};
use crate::repo::part_repo::{PartRepository, RepoError, RepoResult};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

/// Service facade over a shared part repository.
pub struct CatalogService<R: PartRepository> {
    repo: Arc<R>,
}

impl<R: PartRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: PartRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Lists every part in the catalog.
    pub async fn load_catalog(&self) -> RepoResult<Vec<Part>> {
        let started_at = Instant::now();
        let result = self.repo.find_all().await;
        log_query("find_all", 0, started_at, &result);
        result
    }

    /// Runs a search-box query.
    ///
    /// `text` is split on commas into tags that must all be present. Blank
    /// text (or text holding only separators) lists the full catalog.
    pub async fn search(&self, text: &str) -> RepoResult<Vec<Part>> {
        let tags = parse_tags(text);
        if tags.is_empty() {
            return self.load_catalog().await;
        }

        let started_at = Instant::now();
        let result = self.repo.find_by_tags(&tags).await;
        log_query("find_by_tags", tags.len(), started_at, &result);
        result
    }

    /// Re-reads one part, e.g. before opening its detail view.
    pub async fn get_part(&self, id: PartId) -> RepoResult<Option<Part>> {
        let started_at = Instant::now();
        let result = self.repo.get(id).await;
        match &result {
            Ok(found) => info!(
                "event=part_query module=service op=get status=ok found={} duration_ms={}",
                found.is_some(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_error("part_query", "get", started_at, err),
        }
        result
    }

    /// Creates a part from the creation form.
    ///
    /// An unparsable quantity is stored as `0`.
    pub async fn create_part(&self, form: &PartForm) -> RepoResult<Part> {
        let fields = form.to_fields(0.0);
        let started_at = Instant::now();
        let result = self.repo.insert(&fields).await;
        match &result {
            Ok(part) => info!(
                "event=part_write module=service op=insert status=ok part_id={} duration_ms={}",
                part.id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_error("part_write", "insert", started_at, err),
        }
        result
    }

    /// Saves the edit form over an existing part.
    ///
    /// An unparsable quantity keeps `part.qty`. Returns the record as written.
    pub async fn save_part(&self, part: &Part, form: &PartForm) -> RepoResult<Part> {
        let fields = form.to_fields(part.qty);
        let started_at = Instant::now();
        match self.repo.update_fields(part.id, &fields).await {
            Ok(()) => {
                info!(
                    "event=part_write module=service op=update status=ok part_id={} duration_ms={}",
                    part.id,
                    started_at.elapsed().as_millis()
                );
                Ok(Part::with_id(part.id, fields))
            }
            Err(err) => {
                log_error("part_write", "update", started_at, &err);
                Err(err)
            }
        }
    }

    /// Deletes one part by id; returns whether a record was removed.
    pub async fn delete_part(&self, id: PartId) -> RepoResult<bool> {
        let started_at = Instant::now();
        let result = self.repo.delete_by_id(id).await;
        match &result {
            Ok(removed) => info!(
                "event=part_write module=service op=delete status=ok part_id={} removed={} duration_ms={}",
                id,
                removed,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_error("part_write", "delete", started_at, err),
        }
        result
    }
}

fn log_query(op: &str, tag_count: usize, started_at: Instant, result: &RepoResult<Vec<Part>>) {
    match result {
        Ok(parts) => info!(
            "event=part_query module=service op={} status=ok tag_count={} count={} duration_ms={}",
            op,
            tag_count,
            parts.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => log_error("part_query", op, started_at, err),
    }
}

fn log_error(event: &str, op: &str, started_at: Instant, err: &RepoError) {
    error!(
        "event={} module=service op={} status=error duration_ms={} error_code={} error={}",
        event,
        op,
        started_at.elapsed().as_millis(),
        err.code(),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::CatalogService;
    use crate::model::form::PartForm;
    use crate::repo::memory_repo::InMemoryPartRepository;
    use std::sync::Arc;

    fn form(name: &str, tags: &str, qty: &str) -> PartForm {
        PartForm {
            name: name.to_string(),
            tags_text: tags.to_string(),
            location: "Shelf A".to_string(),
            qty_text: qty.to_string(),
        }
    }

    #[tokio::test]
    async fn separator_only_search_lists_everything() {
        let service = CatalogService::new(Arc::new(InMemoryPartRepository::new()));
        service.create_part(&form("Bolt", "metal", "1")).await.unwrap();
        service.create_part(&form("Clip", "plastic", "2")).await.unwrap();

        assert_eq!(service.search(" , ,").await.unwrap().len(), 2);
        assert_eq!(service.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_with_garbage_qty_stores_zero() {
        let service = CatalogService::new(Arc::new(InMemoryPartRepository::new()));
        let created = service.create_part(&form("Bolt", "metal", "many")).await.unwrap();
        assert_eq!(created.qty, 0.0);
    }

    #[tokio::test]
    async fn save_with_garbage_qty_keeps_previous_value() {
        let service = CatalogService::new(Arc::new(InMemoryPartRepository::new()));
        let created = service.create_part(&form("Bolt", "metal", "12")).await.unwrap();

        let saved = service
            .save_part(&created, &form("Bolt M4", "metal, m4", "?"))
            .await
            .unwrap();
        assert_eq!(saved.id, created.id);
        assert_eq!(saved.qty, 12.0);
        assert_eq!(saved.tags, vec!["metal", "m4"]);

        let stored = service.get_part(created.id).await.unwrap().unwrap();
        assert_eq!(stored, saved);
    }
}
