//! Envelope returned by the native completion endpoint.

use serde::{Deserialize, Serialize};

use crate::{Generation, Usage};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub result: CompletionResult,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    pub usage: Option<NativeUsage>,
    pub model_version: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Alternative {
    #[serde(default)]
    pub message: AlternativeMessage,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AlternativeMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub text: String,
}

/// Counters arrive as decimal strings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NativeUsage {
    #[serde(default, with = "common::quoted")]
    pub input_text_tokens: u64,
    #[serde(default, with = "common::quoted")]
    pub completion_tokens: u64,
    #[serde(default, with = "common::quoted")]
    pub total_tokens: u64,
}

impl From<NativeUsage> for Usage {
    fn from(usage: NativeUsage) -> Self {
        Usage {
            prompt_tokens: usage.input_text_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

impl CompletionResponse {
    /// `None` when the provider returned no alternatives.
    pub fn into_generation(self) -> Option<Generation> {
        let usage = self.result.usage.map(Usage::from);
        self.result
            .alternatives
            .into_iter()
            .next()
            .map(|alternative| Generation {
                text: alternative.message.text,
                usage,
            })
    }
}
