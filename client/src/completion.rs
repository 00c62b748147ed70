use common::AppConfig;
use request::{ChatCompletionsRequest, Message};
use response::Generation;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::openai::OpenAiClient;

/// Model and sampling settings for a single-prompt completion.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    /// The configured model and temperature, no system prompt, no token limit.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            model: config.model_uri(),
            system_prompt: None,
            temperature: Some(config.temperature),
            max_tokens: None,
        }
    }

    pub fn system_prompt(mut self, system_prompt: &str) -> Self {
        self.system_prompt = Some(system_prompt.to_string());
        self
    }

    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn request(&self, prompt: &str) -> ChatCompletionsRequest {
        ChatCompletionsRequest::builder(&self.model)
            .messages(self.system_prompt.as_deref().map(Message::system))
            .message(Message::user(prompt))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
    }
}

impl OpenAiClient {
    /// `Ok(None)` when the provider answered without choices.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Generation>> {
        let response = self.chat_completions(&options.request(prompt)).await?;
        Ok(response.into_generation())
    }

    /// Generated text, or an empty string on any failure. Failures are logged, not returned.
    pub async fn generate_text(&self, prompt: &str, options: &GenerationOptions) -> String {
        info!(
            "Sending request via OpenAI-compatible API (Model URI: {})",
            options.model
        );

        match self.generate(prompt, options).await {
            Ok(Some(generation)) if !generation.text.is_empty() => {
                info!(
                    "Successfully received response ({} chars)",
                    generation.text.chars().count()
                );
                generation.text
            }
            Ok(Some(_)) => {
                warn!("Received empty content from API.");
                String::new()
            }
            Ok(None) => {
                warn!("No choices returned from the model.");
                String::new()
            }
            Err(e) => {
                error!("OpenAI-compatible API error: {}", e);
                if let Some(details) = e.details() {
                    error!("Error details: {}", details);
                }
                String::new()
            }
        }
    }
}
