//! Grounded chat commands: `chatrh context` and `chatrh ask`.

use anyhow::{bail, Result};

use chat_rh_core::engine::GroundingEngine;

use crate::config::Config;
use crate::db;
use crate::llm;
use crate::sqlite_store::SqliteStore;

/// Longest message accepted from a caller, in characters.
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Validate a raw chat message before it enters the pipeline.
pub fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("message must not be empty");
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        bail!("message too long (max {} characters)", MAX_MESSAGE_CHARS);
    }
    Ok(())
}

async fn build_engine(config: &Config) -> Result<GroundingEngine<SqliteStore>> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    Ok(GroundingEngine::with_keywords(
        store,
        config.grounding.keyword_table(),
    ))
}

/// Print the assembled grounding block without invoking the model.
pub async fn run_context(config: &Config, message: &str) -> Result<()> {
    validate_message(message)?;

    let engine = build_engine(config).await?;
    let block = engine.build_grounded_context(message).await;
    println!("{}", block);

    engine.store().pool().close().await;
    Ok(())
}

/// Ask the assistant: grounding block + user message → OpenRouter.
pub async fn run_ask(
    config: &Config,
    message: &str,
    model: Option<String>,
    temperature: Option<f64>,
) -> Result<()> {
    validate_message(message)?;

    let engine = build_engine(config).await?;
    let system_prompt = engine.build_grounded_context(message).await;
    engine.store().pool().close().await;

    let reply = llm::chat_completion(
        &config.llm,
        &system_prompt,
        message,
        model.as_deref(),
        temperature,
    )
    .await?;

    println!("{}", reply);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_rejected() {
        assert!(validate_message("   ").is_err());
    }

    #[test]
    fn test_overlong_message_rejected() {
        let message = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(validate_message(&message).is_err());
    }

    #[test]
    fn test_normal_message_accepted() {
        assert!(validate_message("Quels sont mes congés ?").is_ok());
    }
}
