use partman_core::{
    CatalogService, InMemoryPartRepository, ListingFeed, ListingRequest, PartFields,
    PartRepository, RepoError,
};
use std::sync::Arc;

async fn seeded_service() -> CatalogService<InMemoryPartRepository> {
    let repo = Arc::new(InMemoryPartRepository::new());
    repo.insert(&PartFields::new(
        "Bolt M4",
        vec!["fastener".to_string(), "metal".to_string()],
        "Bin 3",
        120.0,
    ))
    .await
    .unwrap();
    repo.insert(&PartFields::new(
        "Cable tie",
        vec!["plastic".to_string()],
        "Bin 7",
        500.0,
    ))
    .await
    .unwrap();
    CatalogService::new(repo)
}

#[tokio::test]
async fn full_listing_is_delivered_over_the_channel() {
    let (feed, mut receiver) = ListingFeed::new(seeded_service().await);
    let generation = feed.request_all();

    let update = receiver.recv().await.unwrap();
    assert_eq!(update.generation, generation);
    assert_eq!(update.request, ListingRequest::All);
    assert_eq!(feed.accept(update).unwrap().unwrap().len(), 2);
}

#[tokio::test]
async fn slow_full_listing_cannot_overwrite_newer_search() {
    let (feed, mut receiver) = ListingFeed::new(seeded_service().await);
    let stale = feed.request_all();
    let current = feed.request_search("metal");
    assert!(current > stale);

    let mut accepted = Vec::new();
    for _ in 0..2 {
        let update = receiver.recv().await.unwrap();
        let generation = update.generation;
        if let Some(outcome) = feed.accept(update) {
            accepted.push((generation, outcome.unwrap()));
        }
    }

    assert_eq!(accepted.len(), 1);
    let (generation, parts) = &accepted[0];
    assert_eq!(*generation, current);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "Bolt M4");
}

#[tokio::test]
async fn next_current_skips_stale_updates() {
    let (feed, mut receiver) = ListingFeed::new(seeded_service().await);
    feed.request_search("plastic");
    feed.request_search("fastener");
    feed.request_all();

    let parts = feed.next_current(&mut receiver).await.unwrap().unwrap();
    assert_eq!(parts.len(), 2);
}

#[tokio::test]
async fn query_failure_is_delivered_as_error() {
    let service = seeded_service().await;
    service.repository().set_fail_queries(true);
    let (feed, mut receiver) = ListingFeed::new(service);
    feed.request_search("metal");

    let outcome = feed.next_current(&mut receiver).await.unwrap();
    assert!(matches!(outcome, Err(RepoError::Query(_))));
}
