#![allow(dead_code)]

use common::AppConfig;
use response::ChatCompletionsResponse;
use serde_json::Value;
use wiremock::{MockServer, ResponseTemplate};

pub const FOLDER_ID: &str = "b1gfolder";
pub const API_KEY: &str = "secret";
pub const NATIVE_PATH: &str = "/foundationModels/v1/completion";
pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// Default config with both endpoints pointed at the mock server.
pub fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        native_api_url: format!("{}{}", server.uri(), NATIVE_PATH),
        openai_base_url: format!("{}/v1", server.uri()),
        ..AppConfig::new(FOLDER_ID, API_KEY)
    }
}

pub fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(
        ChatCompletionsResponse::builder()
            .id(Some("cmpl-test".to_string()))
            .model(Some("yandexgpt-lite".to_string()))
            .content(content)
            .build(),
    )
}

/// Content of the last user message in a chat request body.
pub fn last_user_content(body: &Value) -> String {
    body["messages"]
        .as_array()
        .and_then(|messages| messages.iter().rev().find(|m| m["role"] == "user"))
        .and_then(|message| message["content"].as_str())
        .unwrap_or_default()
        .to_string()
}
