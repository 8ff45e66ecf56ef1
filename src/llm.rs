//! OpenRouter chat-completions client.
//!
//! One call per user turn: the grounding block goes in as the system
//! message, the raw user message follows.
//!
//! Retry strategy:
//! - HTTP 429 or 5xx → retry with exponential backoff
//! - HTTP 4xx (not 429) → fail immediately
//! - Network error → retry

use std::time::Duration;

use anyhow::{bail, Result};

use crate::config::LlmConfig;

/// Send a grounded chat completion and return the generated text.
///
/// The API key is read from `OPENROUTER_API_KEY`; it is never part of
/// the configuration file.
pub async fn chat_completion(
    config: &LlmConfig,
    system_prompt: &str,
    user_message: &str,
    model_override: Option<&str>,
    temperature_override: Option<f64>,
) -> Result<String> {
    let api_key = std::env::var("OPENROUTER_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY not set"))?;

    let model = model_override.unwrap_or(&config.model);
    let temperature = temperature_override.unwrap_or(config.temperature);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let body = serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": user_message},
        ],
        "temperature": temperature,
        "max_tokens": config.max_tokens,
    });

    let mut last_err = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            // Exponential backoff: 1s, 2s, 4s, 8s, ...
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        let resp = client
            .post(&config.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await;

        match resp {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    let json: serde_json::Value = response.json().await?;
                    return parse_chat_response(&json);
                }

                // Rate limited or server error — retry
                if status.as_u16() == 429 || status.is_server_error() {
                    let body_text = response.text().await.unwrap_or_default();
                    last_err = Some(anyhow::anyhow!(
                        "OpenRouter API error {}: {}",
                        status,
                        body_text
                    ));
                    continue;
                }

                // Client error (not 429) — don't retry
                let body_text = response.text().await.unwrap_or_default();
                bail!("OpenRouter API error {}: {}", status, body_text);
            }
            Err(e) => {
                last_err = Some(e.into());
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Chat completion failed after retries")))
}

/// Parse the chat-completions response JSON.
fn parse_chat_response(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            anyhow::anyhow!("Invalid OpenRouter response: missing choices[0].message.content")
        })
}
