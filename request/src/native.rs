//! Payloads for the native `foundationModels/v1/completion` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<NativeMessage>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f64,
    #[serde(with = "common::quoted")]
    pub max_tokens: u32,
}

/// Native messages carry `text` where the OpenAI format has `content`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NativeMessage {
    pub role: NativeRole,
    pub text: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NativeRole {
    System,
    User,
    Assistant,
}

impl CompletionRequest {
    /// A single-turn request. The system prompt, when present and non-empty, goes first.
    pub fn new(
        model_uri: &str,
        prompt: &str,
        system_prompt: Option<&str>,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = system_prompt.filter(|s| !s.is_empty()) {
            messages.push(NativeMessage {
                role: NativeRole::System,
                text: system_prompt.to_string(),
            });
        }
        messages.push(NativeMessage {
            role: NativeRole::User,
            text: prompt.to_string(),
        });

        Self {
            model_uri: model_uri.to_string(),
            completion_options: CompletionOptions {
                stream: false,
                temperature,
                max_tokens,
            },
            messages,
        }
    }
}
