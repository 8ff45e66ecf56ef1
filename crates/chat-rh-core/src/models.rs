//! Core data models used throughout ChatRH.
//!
//! Subjects and articles are loaded from the taxonomy store and are
//! immutable from the engine's perspective; identity is the integer id.

use serde::{Deserialize, Serialize};

/// A taxonomy node grouping related labour-code articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A single stored legal provision.
///
/// `subject_id` is a non-owning reference to a [`Subject`]; many articles
/// share one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub subject_id: i64,
    /// Article number as printed in the code (e.g. `Art.L.30`).
    pub label: String,
    #[serde(default)]
    pub source: String,
    pub content: String,
}

/// A hit from the raw excerpt-search surface.
///
/// Unlike the grounding pipeline, which keeps article content whole, this
/// surface windows the content around the first keyword occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct ExcerptHit {
    pub label: String,
    pub excerpt: String,
    /// Byte offset of the first keyword occurrence in the article content.
    pub position: usize,
}
