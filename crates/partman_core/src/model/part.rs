//! Part domain model.
//!
//! # Responsibility
//! - Define the canonical inventory record and its stored field names.
//! - Separate the immutable identity from the four mutable attributes.
//!
//! # Invariants
//! - `id` is generated client-side once and never reassigned.
//! - Callers mutate parts only through `PartFields`, which carries no id.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stable identifier of one part, native to the document store.
pub type PartId = ObjectId;

/// Mutable attributes of a part.
///
/// Used as the payload of insert and update so an id can never be supplied
/// or changed through a write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartFields {
    pub name: String,
    /// Ordered; search requires every queried tag to be present.
    pub tags: Vec<String>,
    pub location: String,
    /// No non-negativity is enforced.
    pub qty: f64,
}

impl PartFields {
    pub fn new(
        name: impl Into<String>,
        tags: Vec<String>,
        location: impl Into<String>,
        qty: f64,
    ) -> Self {
        Self {
            name: name.into(),
            tags,
            location: location.into(),
            qty,
        }
    }
}

/// One inventory record as stored in the `parts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "_id")]
    pub id: PartId,
    /// Stored as `part-name` to match existing documents.
    #[serde(rename = "part-name", default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub qty: f64,
}

impl Part {
    /// Creates a part with a freshly generated id.
    pub fn new(fields: PartFields) -> Self {
        Self::with_id(ObjectId::new(), fields)
    }

    /// Creates a part with a caller-provided id.
    ///
    /// Used when the id already exists in storage.
    pub fn with_id(id: PartId, fields: PartFields) -> Self {
        Self {
            id,
            name: fields.name,
            tags: fields.tags,
            location: fields.location,
            qty: fields.qty,
        }
    }

    /// Returns a copy of the mutable attributes.
    pub fn fields(&self) -> PartFields {
        PartFields {
            name: self.name.clone(),
            tags: self.tags.clone(),
            location: self.location.clone(),
            qty: self.qty,
        }
    }

    /// Overwrites all mutable attributes, keeping `id`.
    pub fn apply(&mut self, fields: PartFields) {
        self.name = fields.name;
        self.tags = fields.tags;
        self.location = fields.location;
        self.qty = fields.qty;
    }

    /// Returns whether every tag in `required` is present on this part.
    ///
    /// Matching is exact and case-sensitive, like the store's `$all`.
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        required
            .iter()
            .all(|wanted| self.tags.iter().any(|tag| tag == wanted))
    }
}
