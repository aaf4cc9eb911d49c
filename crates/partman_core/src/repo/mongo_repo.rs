//! MongoDB-backed part repository.
//!
//! # Responsibility
//! - Translate repository calls into collection operations.
//! - Keep filter/update document shapes in one place.
//!
//! # Invariants
//! - Stored field names follow `Part`'s serde names (`_id`, `part-name`,
//!   `tags`, `location`, `qty`).
//! - Updates use one `$set` so the four attributes change atomically.

use crate::model::part::{Part, PartFields, PartId};
use crate::repo::part_repo::{PartRepository, RepoError, RepoResult};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

/// Repository over one `Collection<Part>`.
#[derive(Clone)]
pub struct MongoPartRepository {
    collection: Collection<Part>,
}

impl MongoPartRepository {
    pub fn new(collection: Collection<Part>) -> Self {
        Self { collection }
    }

    async fn find(&self, filter: Document) -> RepoResult<Vec<Part>> {
        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(RepoError::query)?;
        cursor.try_collect().await.map_err(RepoError::query)
    }
}

#[async_trait]
impl PartRepository for MongoPartRepository {
    async fn find_all(&self) -> RepoResult<Vec<Part>> {
        self.find(Document::new()).await
    }

    async fn find_by_tags(&self, tags: &[String]) -> RepoResult<Vec<Part>> {
        if tags.is_empty() {
            return self.find_all().await;
        }
        self.find(tag_filter(tags)).await
    }

    async fn get(&self, id: PartId) -> RepoResult<Option<Part>> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(RepoError::query)
    }

    async fn insert(&self, fields: &PartFields) -> RepoResult<Part> {
        let part = Part::new(fields.clone());
        self.collection
            .insert_one(&part)
            .await
            .map_err(RepoError::write)?;
        Ok(part)
    }

    async fn update_fields(&self, id: PartId, fields: &PartFields) -> RepoResult<()> {
        let result = self
            .collection
            .update_one(id_filter(id), set_fields_update(fields))
            .await
            .map_err(RepoError::write)?;

        if result.matched_count == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: PartId) -> RepoResult<bool> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(RepoError::write)?;
        Ok(result.deleted_count > 0)
    }
}

/// `{ "_id": id }`
pub fn id_filter(id: PartId) -> Document {
    doc! { "_id": id }
}

/// `{ "tags": { "$all": tags } }`
pub fn tag_filter(tags: &[String]) -> Document {
    doc! { "tags": { "$all": tags.to_vec() } }
}

/// `$set` of all four mutable attributes.
pub fn set_fields_update(fields: &PartFields) -> Document {
    doc! {
        "$set": {
            "part-name": fields.name.as_str(),
            "tags": fields.tags.clone(),
            "location": fields.location.as_str(),
            "qty": fields.qty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{id_filter, set_fields_update, tag_filter};
    use crate::model::part::{Part, PartFields};
    use mongodb::bson::{self, doc, oid::ObjectId, Bson};

    fn bolt() -> PartFields {
        PartFields::new(
            "Bolt M4",
            vec!["fastener".to_string(), "metal".to_string()],
            "Bin 3",
            120.0,
        )
    }

    #[test]
    fn tag_filter_uses_all_operator() {
        let filter = tag_filter(&["a".to_string(), "b".to_string()]);
        assert_eq!(filter, doc! { "tags": { "$all": ["a", "b"] } });
    }

    #[test]
    fn id_filter_targets_object_id() {
        let id = ObjectId::new();
        assert_eq!(id_filter(id).get_object_id("_id").unwrap(), id);
    }

    #[test]
    fn set_update_covers_all_four_fields_in_one_document() {
        let update = set_fields_update(&bolt());
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.get_str("part-name").unwrap(), "Bolt M4");
        assert_eq!(set.get_str("location").unwrap(), "Bin 3");
        assert_eq!(set.get_f64("qty").unwrap(), 120.0);
        assert_eq!(
            set.get_array("tags").unwrap(),
            &vec![Bson::from("fastener"), Bson::from("metal")]
        );
    }

    #[test]
    fn part_serializes_with_stored_field_names() {
        let part = Part::new(bolt());
        let document = bson::to_document(&part).unwrap();
        assert_eq!(document.get_object_id("_id").unwrap(), part.id);
        assert_eq!(document.get_str("part-name").unwrap(), "Bolt M4");
        assert!(document.get("name").is_none());

        let decoded: Part = bson::from_document(document).unwrap();
        assert_eq!(decoded, part);
    }

    #[test]
    fn part_decodes_documents_with_missing_fields() {
        let id = ObjectId::new();
        let decoded: Part = bson::from_document(doc! { "_id": id, "part-name": "Spring" }).unwrap();
        assert_eq!(decoded.id, id);
        assert_eq!(decoded.name, "Spring");
        assert!(decoded.tags.is_empty());
        assert_eq!(decoded.qty, 0.0);
    }
}
