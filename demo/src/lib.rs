use client::native::DEFAULT_SYSTEM_PROMPT;
use client::{GenerationOptions, NativeClient, OpenAiClient};
use common::AppConfig;
use tracing::{error, warn};

pub const DEFAULT_PROMPT: &str =
    "Explain the difference between 'Process' and 'Thread' in 3 bullet points.";
pub const SDK_TEMPERATURE: f64 = 0.5;

/// One request over the native endpoint. `None` if nothing came back.
pub async fn run_native_demo(config: &AppConfig, prompt: &str) -> Option<String> {
    let client = match NativeClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            error!("Native demo failed: {}", e);
            return None;
        }
    };

    let response = client.generate_text(prompt, DEFAULT_SYSTEM_PROMPT).await;
    (!response.is_empty()).then_some(response)
}

/// One request over the OpenAI-compatible endpoint. `None` if nothing came back.
pub async fn run_sdk_demo(config: &AppConfig, prompt: &str) -> Option<String> {
    let client = match OpenAiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            error!("SDK demo failed: {}", e);
            return None;
        }
    };

    let options = GenerationOptions::new(config)
        .system_prompt(DEFAULT_SYSTEM_PROMPT)
        .temperature(Some(SDK_TEMPERATURE));

    match client.generate(prompt, &options).await {
        Ok(Some(generation)) => Some(generation.text),
        Ok(None) => {
            warn!("No choices returned from the model.");
            None
        }
        Err(e) => {
            error!("SDK request failed: {}", e);
            None
        }
    }
}
