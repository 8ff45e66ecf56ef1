//! Subject listing for the `chatrh subjects` command.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

pub async fn run_subjects(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let rows = sqlx::query(
        "SELECT s.id, s.title, s.description, COUNT(a.id) AS article_count \
         FROM subjects s LEFT JOIN articles a ON a.subject_id = s.id \
         GROUP BY s.id ORDER BY s.id ASC",
    )
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        println!("No subjects loaded. Run `chatrh load <corpus.json>` first.");
        pool.close().await;
        return Ok(());
    }

    for row in &rows {
        let id: i64 = row.get("id");
        let title: String = row.get("title");
        let description: String = row.get("description");
        let article_count: i64 = row.get("article_count");

        println!("{}. {} ({} articles)", id, title, article_count);
        if !description.is_empty() {
            println!("   {}", description);
        }
    }

    pool.close().await;
    Ok(())
}
