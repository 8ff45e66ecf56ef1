use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use chat_rh_core::keywords::{KeywordEntry, KeywordTable};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub grounding: GroundingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}
fn default_model() -> String {
    "mistralai/mistral-small".to_string()
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_temperature() -> f64 {
    0.7
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Grounding engine settings. The keyword table is read once at startup;
/// an empty `keywords` list means the built-in table.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GroundingConfig {
    #[serde(default)]
    pub keywords: Vec<KeywordRow>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeywordRow {
    pub token: String,
    pub subject: String,
}

impl GroundingConfig {
    pub fn keyword_table(&self) -> KeywordTable {
        if self.keywords.is_empty() {
            return KeywordTable::default();
        }
        KeywordTable::new(
            self.keywords
                .iter()
                .map(|row| KeywordEntry {
                    token: row.token.to_lowercase(),
                    subject_title: row.subject.clone(),
                })
                .collect(),
        )
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate llm
    if config.llm.max_tokens == 0 {
        anyhow::bail!("llm.max_tokens must be > 0");
    }
    if !(0.0..=2.0).contains(&config.llm.temperature) {
        anyhow::bail!("llm.temperature must be in [0.0, 2.0]");
    }
    if config.llm.timeout_secs == 0 {
        anyhow::bail!("llm.timeout_secs must be > 0");
    }

    // Validate grounding
    for row in &config.grounding.keywords {
        if row.token.trim().is_empty() || row.subject.trim().is_empty() {
            anyhow::bail!("grounding.keywords entries must have non-empty token and subject");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_llm_defaults() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "data/chatrh.sqlite"

            [server]
            bind = "127.0.0.1:8000"
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.max_tokens, 1024);
        assert!(config.llm.api_url.contains("openrouter.ai"));
        assert!(config.grounding.keywords.is_empty());
        assert!(!config.grounding.keyword_table().is_empty());
    }

    #[test]
    fn test_keyword_rows_override_builtin_table() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "data/chatrh.sqlite"

            [server]
            bind = "127.0.0.1:8000"

            [[grounding.keywords]]
            token = "Astreinte"
            subject = "Durée du travail"
            "#,
        )
        .unwrap();

        let table = config.grounding.keyword_table();
        let entry = table.first_match("une astreinte de nuit").unwrap();
        assert_eq!(entry.subject_title, "Durée du travail");
    }
}
