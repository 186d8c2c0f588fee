//! In-memory implementation of ContentService for testing.
//!
//! Categories are kept in a `BTreeMap`, so listing order is lexicographic for
//! free. Categories registered with no entries behave exactly like absent ones.

use crate::ContentService;
use async_trait::async_trait;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Deterministic, map-backed content provider.
///
/// # Example
/// ```
/// use bangbot_interface::{ContentService, InMemoryContentService};
///
/// # #[tokio::main]
/// # async fn main() {
/// let service = InMemoryContentService::new().with_category("cats", ["a", "b"]);
/// assert_eq!(service.content_count("cats").await, 2);
/// assert!(!service.has_category("dogs").await);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentService {
    categories: Arc<RwLock<BTreeMap<String, Vec<String>>>>,
}

impl InMemoryContentService {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_category<I, S>(self, category: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, entries);
        self
    }

    /// Append entries to a category, creating it if needed.
    pub fn insert<I, S>(&self, category: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .write()
            .entry(category.into())
            .or_default()
            .extend(entries.into_iter().map(Into::into));
    }

    /// Every stored entry for a category (empty when unknown).
    pub fn entries(&self, category: &str) -> Vec<String> {
        self.categories
            .read()
            .get(category)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentService for InMemoryContentService {
    async fn random_content(&self, category: &str) -> String {
        let categories = self.categories.read();
        categories
            .get(category)
            .and_then(|entries| entries.choose(&mut rand::thread_rng()))
            .cloned()
            .unwrap_or_default()
    }

    async fn content_count(&self, category: &str) -> usize {
        self.categories.read().get(category).map_or(0, Vec::len)
    }

    async fn available_categories(&self) -> Vec<String> {
        self.categories
            .read()
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, _)| category.clone())
            .collect()
    }
}
