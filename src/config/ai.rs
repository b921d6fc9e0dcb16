use anyhow::{Context, Result};
use std::env;

/// Value shipped in sample `.env` files; treated the same as no credential.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

/// Remote chat-completion service settings.
#[derive(Clone)]
pub struct AiServiceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl std::fmt::Debug for AiServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for AiServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_secs: 30,
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

impl AiServiceConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            timeout_secs: match env::var("AI_TIMEOUT_SECS") {
                Ok(secs) => secs.parse().context("AI_TIMEOUT_SECS must be an integer")?,
                Err(_) => defaults.timeout_secs,
            },
            ..defaults
        })
    }

    /// False when the key is missing, blank, or the sample placeholder.
    pub fn has_usable_credential(&self) -> bool {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") | Some(PLACEHOLDER_API_KEY) => false,
            Some(_) => true,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
