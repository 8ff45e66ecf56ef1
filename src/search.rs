//! Excerpt search for the `chatrh search` command.
//!
//! This is the raw keyword surface: each hit shows a window of the
//! article content around the match, not the full text.

use anyhow::{bail, Result};

use chat_rh_core::excerpt::search_article_excerpts;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

pub async fn run_search(config: &Config, keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        bail!("keyword must not be empty");
    }

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);

    let hits = search_article_excerpts(&store, keyword).await;

    if hits.is_empty() {
        println!("No results.");
        store.pool().close().await;
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        println!("{}. {} (position {})", i + 1, hit.label, hit.position);
        println!("    \"{}\"", hit.excerpt.replace('\n', " ").trim());
        println!();
    }

    store.pool().close().await;
    Ok(())
}
