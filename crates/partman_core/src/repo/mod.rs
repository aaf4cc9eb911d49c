//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the use-case oriented part data access contract.
//! - Isolate document store query details from service orchestration.
//!
//! # Invariants
//! - Ids are generated client-side on insert and never accepted from callers.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors, split into query and write classes.

pub mod memory_repo;
pub mod mongo_repo;
pub mod part_repo;
