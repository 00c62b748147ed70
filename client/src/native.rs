use common::AppConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use request::native::CompletionRequest;
use response::{CompletionResponse, Generation};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::transport::post_json;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const FOLDER_HEADER: &str = "x-folder-id";

/// Client for the native `foundationModels/v1/completion` endpoint.
///
/// Sampling settings are fixed at construction from [`AppConfig`].
#[derive(Clone, Debug)]
pub struct NativeClient {
    http: reqwest::Client,
    url: String,
    model_name: String,
    model_uri: String,
    temperature: f64,
    max_tokens: u32,
}

impl NativeClient {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut authorization = HeaderValue::from_str(&format!("Api-Key {}", config.api_key))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(FOLDER_HEADER, HeaderValue::from_str(&config.folder_id)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.native_api_url.clone(),
            model_name: config.model_name.clone(),
            model_uri: config.model_uri(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn build_payload(&self, prompt: &str, system_prompt: Option<&str>) -> CompletionRequest {
        CompletionRequest::new(
            &self.model_uri,
            prompt,
            system_prompt,
            self.temperature,
            self.max_tokens,
        )
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        post_json(&self.http, &self.url, request).await
    }

    /// `Ok(None)` when the provider answered without alternatives.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<Option<Generation>> {
        let payload = self.build_payload(prompt, system_prompt);
        Ok(self.complete(&payload).await?.into_generation())
    }

    /// Generated text, or an empty string on any failure. Failures are logged, not returned.
    pub async fn generate_text(&self, prompt: &str, system_prompt: &str) -> String {
        info!("Sending native request. Model: {}", self.model_name);

        match self.generate(prompt, Some(system_prompt)).await {
            Ok(Some(generation)) => {
                info!(
                    "Request successful. Received {} chars.",
                    generation.text.chars().count()
                );
                generation.text
            }
            Ok(None) => {
                warn!("API returned no alternatives.");
                String::new()
            }
            Err(e) => {
                error!("Native API request failed: {}", e);
                if let Some(details) = e.details() {
                    error!("Error details: {}", details);
                }
                String::new()
            }
        }
    }
}
