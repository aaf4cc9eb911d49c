//! Background catalog population.
//!
//! # Responsibility
//! - Run list/search requests off the interactive path.
//! - Deliver results over a channel tagged with a request generation.

pub mod listing_feed;
