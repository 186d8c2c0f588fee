//! Capability traits for content providers.

use async_trait::async_trait;
use bangbot_error::BangbotResult;

/// Resolves categories to stored text snippets.
///
/// Every operation is a query with no caller-visible side effects. Storage
/// failures never cross this boundary: a provider logs them and answers with
/// the empty value, so callers only ever see presence or absence.
///
/// Implementations must uphold `has_category(c) == (content_count(c) > 0)`.
/// The provided `has_category` satisfies it by construction; overriding
/// implementations must preserve it.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// One entry of `category`, chosen uniformly at random on every call.
    ///
    /// Returns an empty string when the category has no entries.
    async fn random_content(&self, category: &str) -> String;

    /// Number of entries stored for `category`; 0 when unknown.
    async fn content_count(&self, category: &str) -> usize;

    /// Every category with at least one entry, each exactly once, sorted
    /// lexicographically.
    async fn available_categories(&self) -> Vec<String>;

    /// Whether `category` has at least one entry.
    async fn has_category(&self, category: &str) -> bool {
        self.content_count(category).await > 0
    }
}

/// Lightweight connectivity check, independent of content queries.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Succeeds when the backing store is usable.
    async fn ping(&self) -> BangbotResult<()>;
}
