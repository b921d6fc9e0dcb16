use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AiServiceConfig;
use crate::models::{PersonaKind, UserContext};
use crate::services::keyword_response::Persona;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion response had no choices")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Routes a chat turn to the remote completion service, or to the persona's
/// keyword table when the service is unconfigured or fails.
#[derive(Debug, Clone)]
pub struct ChatDispatcher {
    client: Client,
    config: AiServiceConfig,
    fitness_trainer: Persona,
    nutritionist: Persona,
}

impl ChatDispatcher {
    pub fn new(config: AiServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            fitness_trainer: Persona::fitness_trainer(),
            nutritionist: Persona::nutritionist(),
        })
    }

    pub fn persona(&self, kind: PersonaKind) -> &Persona {
        match kind {
            PersonaKind::FitnessTrainer => &self.fitness_trainer,
            PersonaKind::Nutritionist => &self.nutritionist,
        }
    }

    pub fn uses_remote(&self) -> bool {
        self.config.has_usable_credential()
    }

    /// Always produces a reply; remote failures are logged and answered locally.
    pub async fn respond(&self, message: &str, kind: PersonaKind, context: &UserContext) -> String {
        let persona = self.persona(kind);

        if !self.uses_remote() {
            debug!(persona = kind.as_str(), "No completion credential configured, using keyword replies");
            return persona.respond(message, context);
        }

        match self.request_completion(persona, message).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(persona = kind.as_str(), error = %err, "Completion service unavailable, using keyword replies");
                persona.respond(message, context)
            }
        }
    }

    async fn request_completion(
        &self,
        persona: &Persona,
        message: &str,
    ) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: persona.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default().trim())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(CompletionError::EmptyChoices)
    }
}
