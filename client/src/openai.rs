use common::AppConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use request::{ChatCompletionsRequest, EmbeddingsRequest};
use response::{ChatCompletionsResponse, EmbeddingsResponse};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::transport::post_json;

/// Header carrying the SDK's `project`; the provider reads it as the folder ID.
pub const PROJECT_HEADER: &str = "openai-project";

/// Client for the OpenAI-compatible endpoints (`/chat/completions`, `/embeddings`).
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        project: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        if let Some(project) = project {
            headers.insert(PROJECT_HEADER, HeaderValue::from_str(project)?);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client pointed at `config.openai_base_url`, scoped to the configured folder.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.openai_base_url,
            &config.api_key,
            Some(&config.folder_id),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat_completions(
        &self,
        request: &ChatCompletionsRequest,
    ) -> Result<ChatCompletionsResponse> {
        debug!(
            "Sending chat completion request with {} messages to model {}",
            request.messages.len(),
            request.model
        );
        post_json(
            &self.http,
            &format!("{}/chat/completions", self.base_url),
            request,
        )
        .await
    }

    pub async fn embeddings(&self, request: &EmbeddingsRequest) -> Result<EmbeddingsResponse> {
        debug!(
            "Requesting {} embeddings from {}",
            request.input.len(),
            request.model
        );
        post_json(&self.http, &format!("{}/embeddings", self.base_url), request).await
    }

    /// Embed a single text. Newlines are flattened to spaces first.
    pub async fn embed(&self, text: &str, model_uri: &str) -> Result<Vec<f64>> {
        let request = EmbeddingsRequest::new(model_uri, vec![text.replace('\n', " ")]);

        self.embeddings(&request)
            .await?
            .into_vectors()
            .into_iter()
            .next()
            .ok_or(ClientError::Empty("embeddings"))
    }
}
