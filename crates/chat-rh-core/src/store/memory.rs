//! In-memory [`TaxonomyStore`] implementation for tests and in-process use.
//!
//! Uses `Vec` behind `std::sync::RwLock` for thread safety. Content search
//! is a brute-force lowercase scan over all stored articles.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Article, Subject};

use super::TaxonomyStore;

/// In-memory store backed by plain vectors.
pub struct InMemoryStore {
    subjects: RwLock<Vec<Subject>>,
    articles: RwLock<Vec<Article>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            subjects: RwLock::new(Vec::new()),
            articles: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_subject(&self, subject: Subject) {
        self.subjects.write().unwrap().push(subject);
    }

    pub fn insert_article(&self, article: Article) {
        self.articles.write().unwrap().push(article);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxonomyStore for InMemoryStore {
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut subjects = self.subjects.read().unwrap().clone();
        subjects.sort_by_key(|s| s.id);
        Ok(subjects)
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        let subjects = self.subjects.read().unwrap();
        Ok(subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn get_articles_by_subject(&self, subject_id: i64) -> Result<Vec<Article>> {
        let articles = self.articles.read().unwrap();
        let mut matched: Vec<Article> = articles
            .iter()
            .filter(|a| a.subject_id == subject_id)
            .cloned()
            .collect();
        matched.sort_by_key(|a| a.id);
        Ok(matched)
    }

    async fn search_articles_by_content(
        &self,
        keyword: &str,
        limit: i64,
    ) -> Result<Vec<Article>> {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let articles = self.articles.read().unwrap();
        let mut matched: Vec<Article> = articles
            .iter()
            .filter(|a| a.content.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matched.sort_by_key(|a| a.id);
        matched.truncate(limit.max(0) as usize);
        Ok(matched)
    }
}
