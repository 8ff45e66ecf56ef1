//! Corpus loading: JSON file → SQLite.
//!
//! The corpus file carries the full subject taxonomy and article set:
//!
//! ```json
//! {
//!   "subjects": [{"id": 1, "title": "Congés", "description": "…"}],
//!   "articles": [{"id": 1, "subject_id": 1, "label": "Art.L.148",
//!                 "source": "Code du travail", "content": "…"}]
//! }
//! ```
//!
//! Loading is an upsert by id: re-running it with an updated corpus
//! replaces changed rows and never duplicates.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use chat_rh_core::models::{Article, Subject};

use crate::config::Config;
use crate::db;

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    subjects: Vec<Subject>,
    #[serde(default)]
    articles: Vec<Article>,
}

pub async fn run_load(config: &Config, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let corpus: CorpusFile =
        serde_json::from_str(&raw).with_context(|| "Failed to parse corpus file")?;

    let pool = db::connect(config).await?;
    let mut tx = pool.begin().await?;

    for subject in &corpus.subjects {
        sqlx::query(
            r#"
            INSERT INTO subjects (id, title, description)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description
            "#,
        )
        .bind(subject.id)
        .bind(&subject.title)
        .bind(&subject.description)
        .execute(&mut *tx)
        .await?;
    }

    for article in &corpus.articles {
        sqlx::query(
            r#"
            INSERT INTO articles (id, subject_id, label, source, content)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                subject_id = excluded.subject_id,
                label = excluded.label,
                source = excluded.source,
                content = excluded.content
            "#,
        )
        .bind(article.id)
        .bind(article.subject_id)
        .bind(&article.label)
        .bind(&article.source)
        .bind(&article.content)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    println!(
        "Loaded {} subjects and {} articles from {}",
        corpus.subjects.len(),
        corpus.articles.len(),
        path.display()
    );

    pool.close().await;
    Ok(())
}
