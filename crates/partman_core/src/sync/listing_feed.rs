//! Generation-tagged listing requests.
//!
//! # Responsibility
//! - Spawn one task per list/search request and send its result to a
//!   channel.
//! - Discard responses that were overtaken by a newer request.
//!
//! # Invariants
//! - Generations are issued strictly increasing, starting at 1.
//! - Only the response for the newest issued generation is accepted,
//!   whatever order responses arrive in.
//! - Requests are never cancelled and have no timeout.

use crate::model::part::Part;
use crate::repo::part_repo::{PartRepository, RepoResult};
use crate::service::catalog_service::CatalogService;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Monotonic request number.
pub type Generation = u64;

/// What a listing request asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRequest {
    /// Full catalog.
    All,
    /// Search-box text, split into tags by the service.
    Search(String),
}

/// One finished request as delivered on the channel.
#[derive(Debug)]
pub struct ListingUpdate {
    pub generation: Generation,
    pub request: ListingRequest,
    pub outcome: RepoResult<Vec<Part>>,
}

/// Issues listing requests and filters their responses.
pub struct ListingFeed<R: PartRepository + 'static> {
    service: CatalogService<R>,
    latest: Arc<AtomicU64>,
    sender: UnboundedSender<ListingUpdate>,
}

impl<R: PartRepository + 'static> ListingFeed<R> {
    /// Creates a feed and the receiving end of its update channel.
    pub fn new(service: CatalogService<R>) -> (Self, UnboundedReceiver<ListingUpdate>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let feed = Self {
            service,
            latest: Arc::new(AtomicU64::new(0)),
            sender,
        };
        (feed, receiver)
    }

    /// Requests the full catalog. Must be called within a tokio runtime.
    pub fn request_all(&self) -> Generation {
        self.spawn(ListingRequest::All)
    }

    /// Requests a search-box query. Must be called within a tokio runtime.
    pub fn request_search(&self, text: impl Into<String>) -> Generation {
        self.spawn(ListingRequest::Search(text.into()))
    }

    /// Newest generation issued so far; `0` before the first request.
    pub fn latest_generation(&self) -> Generation {
        self.latest.load(Ordering::SeqCst)
    }

    /// Returns whether `update` answers the newest issued request.
    pub fn is_current(&self, update: &ListingUpdate) -> bool {
        update.generation == self.latest_generation()
    }

    /// Unwraps the outcome of a current update; drops stale ones.
    pub fn accept(&self, update: ListingUpdate) -> Option<RepoResult<Vec<Part>>> {
        if self.is_current(&update) {
            return Some(update.outcome);
        }

        debug!(
            "event=listing_update module=sync status=stale generation={} latest={}",
            update.generation,
            self.latest_generation()
        );
        None
    }

    /// Waits for the next accepted update, skipping stale ones.
    ///
    /// Returns `None` only when the channel is closed.
    pub async fn next_current(
        &self,
        receiver: &mut UnboundedReceiver<ListingUpdate>,
    ) -> Option<RepoResult<Vec<Part>>> {
        while let Some(update) = receiver.recv().await {
            if let Some(outcome) = self.accept(update) {
                return Some(outcome);
            }
        }
        None
    }

    fn spawn(&self, request: ListingRequest) -> Generation {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let service = self.service.clone();
        let sender = self.sender.clone();
        debug!(
            "event=listing_update module=sync status=start generation={} kind={}",
            generation,
            request_kind(&request)
        );

        tokio::spawn(async move {
            let outcome = match &request {
                ListingRequest::All => service.load_catalog().await,
                ListingRequest::Search(text) => service.search(text).await,
            };
            // Receiver gone means the screen was torn down.
            let _ = sender.send(ListingUpdate {
                generation,
                request,
                outcome,
            });
        });

        generation
    }
}

fn request_kind(request: &ListingRequest) -> &'static str {
    match request {
        ListingRequest::All => "all",
        ListingRequest::Search(_) => "search",
    }
}

#[cfg(test)]
mod tests {
    use super::{ListingFeed, ListingRequest, ListingUpdate};
    use crate::repo::memory_repo::InMemoryPartRepository;
    use crate::service::catalog_service::CatalogService;
    use std::sync::Arc;

    fn feed() -> ListingFeed<InMemoryPartRepository> {
        let service = CatalogService::new(Arc::new(InMemoryPartRepository::new()));
        ListingFeed::new(service).0
    }

    fn update(generation: u64) -> ListingUpdate {
        ListingUpdate {
            generation,
            request: ListingRequest::All,
            outcome: Ok(Vec::new()),
        }
    }

    #[tokio::test]
    async fn generations_increase_from_one() {
        let feed = feed();
        assert_eq!(feed.latest_generation(), 0);
        assert_eq!(feed.request_all(), 1);
        assert_eq!(feed.request_search("metal"), 2);
        assert_eq!(feed.latest_generation(), 2);
    }

    #[tokio::test]
    async fn accept_drops_overtaken_updates() {
        let feed = feed();
        feed.request_all();
        feed.request_all();

        assert!(feed.accept(update(1)).is_none());
        assert!(feed.accept(update(2)).is_some());
    }
}
