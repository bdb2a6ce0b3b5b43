//! Search integration tests over the in-memory stores.

use std::sync::Arc;

use clip_pack_bot::adapters::memory::{
    InMemoryClipStore, InMemoryPackStore, InMemorySubscriptionStore,
};
use clip_pack_bot::application::Repositories;
use clip_pack_bot::domain::foundation::{ClipId, UserId};

const CREATOR: UserId = UserId::new(1);
const READER: UserId = UserId::new(2);

fn repos_with_page_size(page_size: usize) -> Repositories {
    Repositories::new(
        Arc::new(InMemoryPackStore::new()),
        Arc::new(InMemorySubscriptionStore::new()),
        Arc::new(InMemoryClipStore::new().with_page_size(page_size)),
    )
}

async fn add(repos: &Repositories, pack: &str, clip: &str, keywords: &str) {
    let added = repos
        .clips
        .add(pack, CREATOR, ClipId::new(clip).unwrap(), keywords)
        .await
        .unwrap();
    assert!(added, "{} was already in {}", clip, pack);
}

async fn search(repos: &Repositories, user: UserId, query: &str) -> Vec<String> {
    let mut ids: Vec<String> = repos
        .clips
        .search(user, query)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.clip_id.as_str().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn subscribed_selector_with_and_without_keywords() {
    let repos = repos_with_page_size(50);
    repos.packs.create("CATS", CREATOR).await.unwrap();
    repos.subscriptions.subscribe("CATS", READER).await.unwrap();
    add(&repos, "CATS", "c1", "funny").await;

    assert_eq!(search(&repos, READER, "-").await, vec!["c1"]);
    assert_eq!(search(&repos, READER, "").await, vec!["c1"]);
    assert!(search(&repos, READER, "- serious").await.is_empty());
    assert_eq!(search(&repos, READER, "- serious FUNNY").await, vec!["c1"]);
}

#[tokio::test]
async fn literal_pack_needs_no_subscription() {
    let repos = repos_with_page_size(50);
    repos.packs.create("Dogs", CREATOR).await.unwrap();
    add(&repos, "dogs", "d1", "fetch ball").await;

    assert!(search(&repos, READER, "-").await.is_empty());
    assert_eq!(search(&repos, READER, "DOGS ball").await, vec!["d1"]);
    assert!(search(&repos, READER, "cats").await.is_empty());
    assert!(search(&repos, READER, "c@ts").await.is_empty());
}

#[tokio::test]
async fn results_span_every_page() {
    let repos = repos_with_page_size(2);
    repos.packs.create("CATS", CREATOR).await.unwrap();
    repos.subscriptions.subscribe("CATS", READER).await.unwrap();
    for i in 0..5 {
        add(&repos, "CATS", &format!("c{}", i), "cat").await;
    }

    assert_eq!(
        search(&repos, READER, "- cat").await,
        vec!["c0", "c1", "c2", "c3", "c4"]
    );
}

#[tokio::test]
async fn same_clip_in_two_packs_is_returned_once() {
    let repos = repos_with_page_size(50);
    for pack in ["CATS", "MEMES"] {
        repos.packs.create(pack, CREATOR).await.unwrap();
        repos.subscriptions.subscribe(pack, READER).await.unwrap();
    }
    add(&repos, "CATS", "shared", "cat").await;
    add(&repos, "MEMES", "shared", "meme").await;
    add(&repos, "MEMES", "other", "meme").await;

    assert_eq!(search(&repos, READER, "-").await, vec!["other", "shared"]);
}

#[tokio::test]
async fn deleted_packs_drop_out_of_results() {
    let repos = repos_with_page_size(50);
    repos.packs.create("CATS", CREATOR).await.unwrap();
    repos.packs.create("DOGS", CREATOR).await.unwrap();
    for pack in ["CATS", "DOGS"] {
        repos.subscriptions.subscribe(pack, READER).await.unwrap();
    }
    add(&repos, "CATS", "c1", "pet").await;
    add(&repos, "DOGS", "d1", "pet").await;

    repos.packs.soft_delete("CATS", CREATOR).await.unwrap();
    assert_eq!(search(&repos, READER, "- pet").await, vec!["d1"]);

    repos.packs.hard_delete("DOGS", CREATOR).await.unwrap();
    assert!(search(&repos, READER, "- pet").await.is_empty());
    assert!(search(&repos, READER, "DOGS").await.is_empty());
}

#[tokio::test]
async fn symbol_only_keywords_match_nothing() {
    let repos = repos_with_page_size(50);
    repos.packs.create("cats", CREATOR).await.unwrap();
    repos.subscriptions.subscribe("cats", READER).await.unwrap();
    add(&repos, "cats", "f1", "funny").await;

    assert!(search(&repos, READER, "cats ???").await.is_empty());
    assert!(search(&repos, READER, "- !! ...").await.is_empty());
    assert!(search(&repos, READER, "cats serious").await.is_empty());
    assert_eq!(search(&repos, READER, "cats ??? funny").await, vec!["f1"]);
    assert_eq!(search(&repos, READER, "cats").await, vec!["f1"]);
}
