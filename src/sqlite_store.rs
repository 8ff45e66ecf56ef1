//! SQLite-backed [`TaxonomyStore`] implementation.
//!
//! Maps each store operation to a query against the `subjects` and
//! `articles` tables created by the migrations.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use chat_rh_core::models::{Article, Subject};
use chat_rh_core::store::TaxonomyStore;

/// SQLite implementation of the [`TaxonomyStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Total number of stored articles, for health reporting.
    pub async fn count_articles(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn subject_from_row(row: &sqlx::sqlite::SqliteRow) -> Subject {
    Subject {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
    }
}

fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        id: row.get("id"),
        subject_id: row.get("subject_id"),
        label: row.get("label"),
        source: row.get("source"),
        content: row.get("content"),
    }
}

#[async_trait]
impl TaxonomyStore for SqliteStore {
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let rows = sqlx::query("SELECT id, title, description FROM subjects ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(subject_from_row).collect())
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        let row = sqlx::query("SELECT id, title, description FROM subjects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(subject_from_row))
    }

    async fn get_articles_by_subject(&self, subject_id: i64) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT id, subject_id, label, source, content FROM articles \
             WHERE subject_id = ? ORDER BY id ASC",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(article_from_row).collect())
    }

    async fn search_articles_by_content(
        &self,
        keyword: &str,
        limit: i64,
    ) -> Result<Vec<Article>> {
        let pattern = format!("%{}%", keyword.to_lowercase());
        let rows = sqlx::query(
            "SELECT id, subject_id, label, source, content FROM articles \
             WHERE LOWER(content) LIKE ? ORDER BY id ASC LIMIT ?",
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(article_from_row).collect())
    }
}
