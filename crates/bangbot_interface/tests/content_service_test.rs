//! Contract tests for ContentService using the in-memory provider.

use bangbot_interface::{ContentService, InMemoryContentService};
use std::collections::HashSet;
use std::sync::Arc;

fn sample_service() -> InMemoryContentService {
    InMemoryContentService::new()
        .with_category("cats", ["a", "b"])
        .with_category("dogs", ["woof"])
        .with_category("birds", Vec::<String>::new())
}

#[tokio::test]
async fn test_cats_scenario() {
    let service = sample_service();

    assert_eq!(service.content_count("cats").await, 2);
    assert!(service.has_category("cats").await);
    assert!(!service.has_category("fish").await);

    let content = service.random_content("cats").await;
    assert!(content == "a" || content == "b", "unexpected content {content:?}");
}

#[tokio::test]
async fn test_missing_category_resolves_to_empty_string() {
    let service = sample_service();

    assert_eq!(service.random_content("fish").await, "");
    assert_eq!(service.content_count("fish").await, 0);
}

#[tokio::test]
async fn test_empty_category_is_treated_as_absent() {
    let service = sample_service();

    assert_eq!(service.content_count("birds").await, 0);
    assert!(!service.has_category("birds").await);
    assert_eq!(service.random_content("birds").await, "");
    assert!(!service.available_categories().await.contains(&"birds".to_string()));
}

#[tokio::test]
async fn test_has_category_agrees_with_count() {
    let service = sample_service();

    for category in ["cats", "dogs", "birds", "fish", "", "CATS"] {
        assert_eq!(
            service.has_category(category).await,
            service.content_count(category).await > 0,
            "invariant broken for {category:?}"
        );
    }
}

#[tokio::test]
async fn test_categories_are_case_sensitive() {
    let service = sample_service();

    assert!(service.has_category("cats").await);
    assert!(!service.has_category("Cats").await);
}

#[tokio::test]
async fn test_random_content_is_always_a_stored_entry() {
    let service = InMemoryContentService::new().with_category("quotes", ["one", "two", "three"]);
    let stored: HashSet<String> = service.entries("quotes").into_iter().collect();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let content = service.random_content("quotes").await;
        assert!(stored.contains(&content), "{content:?} was never stored");
        seen.insert(content);
    }

    // 200 draws over three entries: every entry shows up barring astronomically bad luck.
    assert_eq!(seen, stored);
}

#[tokio::test]
async fn test_available_categories_sorted_and_unique() {
    let service = InMemoryContentService::new()
        .with_category("zebra", ["z"])
        .with_category("apple", ["a"])
        .with_category("mango", ["m"]);
    service.insert("apple", ["a2"]);

    let categories = service.available_categories().await;
    assert_eq!(categories, vec!["apple", "mango", "zebra"]);
    assert_eq!(service.content_count("apple").await, 2);
}

#[tokio::test]
async fn test_empty_service_lists_nothing() {
    let service = InMemoryContentService::new();

    assert!(service.available_categories().await.is_empty());
}

#[tokio::test]
async fn test_usable_as_trait_object_across_tasks() {
    let service: Arc<dyn ContentService> = Arc::new(sample_service());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.random_content("dogs").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.expect("task panicked"), "woof");
    }
}
