//! Domain model for inventory parts.
//!
//! # Responsibility
//! - Define the canonical part record stored in the remote collection.
//! - Define the text form shape used by edit/creation screens.
//!
//! # Invariants
//! - Every part is identified by a stable `PartId` assigned at creation.
//! - Deletion is a hard delete; there are no tombstones or versions.

pub mod form;
pub mod part;
