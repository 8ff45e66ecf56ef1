//! Storage abstraction for ChatRH.
//!
//! The [`TaxonomyStore`] trait defines the read-only operations the
//! grounding pipeline needs, enabling pluggable backends (SQLite,
//! in-memory).
//!
//! Methods return `Result` so that backends can report connection or
//! query failures; the engine recovers from every failure locally by
//! treating it as an empty result, so no store error ever reaches the
//! engine's caller.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Article, Subject};

/// Read-only store of subjects and articles.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_subjects`](TaxonomyStore::list_subjects) | All subjects, id ascending |
/// | [`get_subject_by_id`](TaxonomyStore::get_subject_by_id) | Direct subject lookup |
/// | [`get_articles_by_subject`](TaxonomyStore::get_articles_by_subject) | Articles of one subject, id ascending |
/// | [`search_articles_by_content`](TaxonomyStore::search_articles_by_content) | Case-insensitive substring search on content |
#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    /// List all subjects, ordered by id ascending.
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// Retrieve a single subject by id, `None` if absent.
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;

    /// Retrieve all articles belonging to a subject, ordered by article
    /// id ascending.
    async fn get_articles_by_subject(&self, subject_id: i64) -> Result<Vec<Article>>;

    /// Case-insensitive substring search on article content, ordered by
    /// article id ascending, at most `limit` results.
    async fn search_articles_by_content(&self, keyword: &str, limit: i64)
        -> Result<Vec<Article>>;
}
