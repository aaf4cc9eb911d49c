//! Core data access for the Part Manager inventory client.
//! Screens talk to this crate only; it owns credentials, store access and
//! listing order.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use auth::credentials::{CredentialError, Credentials};
pub use db::{connect, ConnectionError, ConnectorConfig, Session, StoreError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::form::{format_qty, parse_qty, parse_tags, PartForm};
pub use model::part::{Part, PartFields, PartId};
pub use repo::memory_repo::InMemoryPartRepository;
pub use repo::mongo_repo::MongoPartRepository;
pub use repo::part_repo::{PartRepository, RepoError, RepoResult};
pub use service::catalog_service::CatalogService;
pub use sync::listing_feed::{Generation, ListingFeed, ListingRequest, ListingUpdate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
