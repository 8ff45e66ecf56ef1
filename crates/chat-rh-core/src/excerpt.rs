//! Raw excerpt search, the coarser of the two search surfaces.
//!
//! Used outside the grounding pipeline for direct keyword lookup: each
//! hit carries only a content window around the first keyword occurrence
//! instead of the full article text. The grounding path deliberately
//! keeps article content whole; the two surfaces stay separate.

use crate::models::ExcerptHit;
use crate::store::TaxonomyStore;

/// Characters kept on each side of the keyword occurrence.
pub const EXCERPT_RADIUS: usize = 100;
/// Maximum number of excerpt hits returned.
pub const EXCERPT_LIMIT: i64 = 10;

/// Search article content for a keyword and return windowed excerpts.
///
/// Store failures degrade to an empty result.
pub async fn search_article_excerpts<S: TaxonomyStore>(
    store: &S,
    keyword: &str,
) -> Vec<ExcerptHit> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }

    let articles = store
        .search_articles_by_content(keyword, EXCERPT_LIMIT)
        .await
        .unwrap_or_default();

    let needle = keyword.to_lowercase();
    let mut hits: Vec<ExcerptHit> = articles
        .iter()
        .filter_map(|article| {
            excerpt_around(&article.content, &needle).map(|(excerpt, position)| ExcerptHit {
                label: article.label.clone(),
                excerpt,
                position,
            })
        })
        .collect();
    hits.truncate(EXCERPT_LIMIT as usize);
    hits
}

/// Window the content around the first occurrence of `needle_lower`.
///
/// Returns `None` when the needle does not occur (the store matched on a
/// different normalization).
fn excerpt_around(content: &str, needle_lower: &str) -> Option<(String, usize)> {
    let content_lower = content.to_lowercase();
    let position = content_lower.find(needle_lower)?.min(content.len());

    let start = snap_to_char_boundary(content, position.saturating_sub(EXCERPT_RADIUS));
    let end = snap_to_char_boundary(
        content,
        (position + needle_lower.len() + EXCERPT_RADIUS).min(content.len()),
    );

    Some((content[start..end].to_string(), position))
}

/// Walk `idx` down to the nearest UTF-8 character boundary.
fn snap_to_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;
    use crate::store::memory::InMemoryStore;

    fn store_with(content: &str) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_article(Article {
            id: 1,
            subject_id: 1,
            label: "Art.L.30".to_string(),
            source: "Code du travail".to_string(),
            content: content.to_string(),
        });
        store
    }

    #[tokio::test]
    async fn test_short_content_returned_whole() {
        let store = store_with("Le salaire est versé chaque mois.");
        let hits = search_article_excerpts(&store, "salaire").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].excerpt, "Le salaire est versé chaque mois.");
        assert_eq!(hits[0].label, "Art.L.30");
    }

    #[tokio::test]
    async fn test_long_content_is_windowed() {
        let padding = "x".repeat(400);
        let content = format!("{padding} indemnité {padding}");
        let store = store_with(&content);

        let hits = search_article_excerpts(&store, "indemnité").await;
        assert_eq!(hits.len(), 1);
        assert!(hits[0].excerpt.contains("indemnité"));
        // ±100 chars plus the keyword itself, nowhere near the full text.
        assert!(hits[0].excerpt.len() < 250);
        assert_eq!(hits[0].position, 401);
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        let store = store_with("INDEMNITÉ de licenciement");
        let hits = search_article_excerpts(&store, "indemnité").await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_keyword_returns_nothing() {
        let store = store_with("contenu");
        assert!(search_article_excerpts(&store, "   ").await.is_empty());
    }
}
