//! Article collection, deduplication, and the hard result cap.
//!
//! With a resolved subject the collector fetches that subject's articles
//! and nothing else. Without one it degrades to a content search over the
//! first few long words of the message. Store failures at any point
//! degrade to zero results for the failing call; nothing is propagated.

use std::collections::HashSet;

use crate::models::{Article, Subject};
use crate::store::TaxonomyStore;

/// Hard cap on the number of articles handed to the context assembler.
pub const MAX_CONTEXT_ARTICLES: usize = 10;

/// Fallback words must be strictly longer than this many characters.
const FALLBACK_MIN_WORD_CHARS: usize = 4;
/// At most this many fallback words are searched.
const FALLBACK_MAX_WORDS: usize = 5;
/// Per-word result limit for the fallback content search.
const FALLBACK_RESULTS_PER_WORD: i64 = 5;

/// Collect candidate articles for a message.
///
/// The two paths are exclusive: a resolved subject scopes the whole
/// result set, and the keyword fallback runs only when resolution
/// produced nothing.
pub async fn collect_articles<S: TaxonomyStore>(
    store: &S,
    subject: Option<&Subject>,
    message: &str,
) -> Vec<Article> {
    match subject {
        Some(subject) => store
            .get_articles_by_subject(subject.id)
            .await
            .unwrap_or_default(),
        None => collect_by_keywords(store, message).await,
    }
}

/// Content-search fallback over the first five message words longer than
/// four characters, short-circuiting once ten articles have accumulated.
async fn collect_by_keywords<S: TaxonomyStore>(store: &S, message: &str) -> Vec<Article> {
    let lowered = message.to_lowercase();
    let words: Vec<String> = crate::keywords::message_words(&lowered)
        .into_iter()
        .filter(|w| w.chars().count() > FALLBACK_MIN_WORD_CHARS)
        .take(FALLBACK_MAX_WORDS)
        .collect();

    let mut articles = Vec::new();
    for word in words {
        if articles.len() >= MAX_CONTEXT_ARTICLES {
            break;
        }
        let hits = store
            .search_articles_by_content(&word, FALLBACK_RESULTS_PER_WORD)
            .await
            .unwrap_or_default();
        articles.extend(hits);
    }
    articles
}

/// Drop duplicate article ids (first occurrence wins) and truncate to
/// `cap` entries, preserving emission order.
pub fn dedup_and_cap(articles: Vec<Article>, cap: usize) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(articles.len().min(cap));
    for article in articles {
        if seen.insert(article.id) {
            out.push(article);
            if out.len() == cap {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    fn article(id: i64, subject_id: i64, content: &str) -> Article {
        Article {
            id,
            subject_id,
            label: format!("Art.L.{id}"),
            source: "Code du travail".to_string(),
            content: content.to_string(),
        }
    }

    fn subject(id: i64, title: &str) -> Subject {
        Subject {
            id,
            title: title.to_string(),
            description: String::new(),
        }
    }

    /// Store whose every call fails, for degradation tests.
    struct FailingStore;

    #[async_trait]
    impl TaxonomyStore for FailingStore {
        async fn list_subjects(&self) -> Result<Vec<Subject>> {
            bail!("store unavailable")
        }
        async fn get_subject_by_id(&self, _id: i64) -> Result<Option<Subject>> {
            bail!("store unavailable")
        }
        async fn get_articles_by_subject(&self, _subject_id: i64) -> Result<Vec<Article>> {
            bail!("store unavailable")
        }
        async fn search_articles_by_content(
            &self,
            _keyword: &str,
            _limit: i64,
        ) -> Result<Vec<Article>> {
            bail!("store unavailable")
        }
    }

    #[tokio::test]
    async fn test_subject_scoped_collection() {
        let store = InMemoryStore::new();
        store.insert_article(article(3, 1, "troisième"));
        store.insert_article(article(1, 1, "premier"));
        store.insert_article(article(2, 2, "autre sujet"));

        let s = subject(1, "Congés");
        let collected = collect_articles(&store, Some(&s), "peu importe").await;
        let ids: Vec<i64> = collected.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_keyword_fallback_skips_short_words() {
        let store = InMemoryStore::new();
        store.insert_article(article(1, 1, "le délai de préavis applicable"));

        // "de" and "un" are too short to be searched; "préavis" is not.
        let collected = collect_articles(&store, None, "un préavis de combien").await;
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].id, 1);
    }

    #[tokio::test]
    async fn test_keyword_fallback_uses_first_five_long_words() {
        let store = InMemoryStore::new();
        store.insert_article(article(1, 1, "sixième mot jamais cherché"));

        // Six words longer than four chars; the sixth must not be searched.
        let message = "alpha1 bravo2 charlie delta4 echo56 sixième";
        let collected = collect_articles(&store, None, message).await;
        assert!(collected.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_fallback_short_circuits_at_cap() {
        let store = InMemoryStore::new();
        for id in 1..=5 {
            store.insert_article(article(id, 1, "alphabet complet"));
        }
        for id in 6..=10 {
            store.insert_article(article(id, 2, "bravoure certaine"));
        }
        for id in 11..=15 {
            store.insert_article(article(id, 3, "charpente solide"));
        }

        // Two words reach ten accumulated results; the third word's
        // articles must never be fetched.
        let collected = collect_articles(&store, None, "alphabet bravoure charpente").await;
        assert_eq!(collected.len(), 10);
        assert!(collected.iter().all(|a| a.id <= 10));
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty() {
        let s = subject(1, "Congés");
        assert!(collect_articles(&FailingStore, Some(&s), "congés").await.is_empty());
        assert!(collect_articles(&FailingStore, None, "message quelconque").await.is_empty());
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let input = vec![
            article(2, 1, "b"),
            article(1, 1, "a"),
            article(2, 1, "b encore"),
            article(3, 1, "c"),
        ];
        let out = dedup_and_cap(input, MAX_CONTEXT_ARTICLES);
        let ids: Vec<i64> = out.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_cap_truncates_to_ten() {
        let input: Vec<Article> = (1..=25).map(|id| article(id, 1, "x")).collect();
        let out = dedup_and_cap(input, MAX_CONTEXT_ARTICLES);
        assert_eq!(out.len(), 10);
        let ids: Vec<i64> = out.iter().map(|a| a.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }
}
