mod support;

use client::OpenAiClient;
use client::batch::{BATCH_MAX_TOKENS, BATCH_SYSTEM_PROMPT, process_batch};
use common::AppConfig;
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use support::{CHAT_PATH, chat_reply, config_for, last_user_content};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn echo_server(delay: Duration) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(move |request: &Request| {
            let body: Value = request.body_json().unwrap();
            let prompt = last_user_content(&body);
            if prompt.contains("fail") {
                ResponseTemplate::new(500).set_body_string("internal error")
            } else {
                chat_reply(&format!("answer to {prompt}")).set_delay(delay)
            }
        })
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn results_keep_prompt_order_and_failures_become_empty() {
    let server = echo_server(Duration::ZERO).await;
    let config = config_for(&server);
    let client = OpenAiClient::from_config(&config).unwrap();

    let results = process_batch(
        &client,
        &config,
        &prompts(&["Explain A100 Tensor Cores.", "please fail", "What is NCCL?"]),
    )
    .await;

    assert_eq!(
        results,
        vec![
            "answer to Explain A100 Tensor Cores.".to_string(),
            String::new(),
            "answer to What is NCCL?".to_string(),
        ]
    );
}

#[tokio::test]
async fn batch_requests_use_expert_prompt_and_token_cap() {
    let server = echo_server(Duration::ZERO).await;
    let config = config_for(&server);
    let client = OpenAiClient::from_config(&config).unwrap();

    process_batch(&client, &config, &prompts(&["FP32 vs BF16?"])).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["max_tokens"], json!(BATCH_MAX_TOKENS));
    assert_eq!(body["temperature"], json!(config.temperature));
    assert_eq!(
        body["messages"][0],
        json!({ "role": "system", "content": BATCH_SYSTEM_PROMPT })
    );
}

#[tokio::test]
async fn concurrency_cap_serializes_excess_requests() {
    let delay = Duration::from_millis(150);
    let server = echo_server(delay).await;
    let config = AppConfig {
        max_concurrent_requests: 2,
        ..config_for(&server)
    };
    let client = OpenAiClient::from_config(&config).unwrap();

    let started = Instant::now();
    let results = process_batch(&client, &config, &prompts(&["a", "b", "c", "d"])).await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.starts_with("answer to")));
    // Four requests through two permits need at least two delay periods.
    assert!(started.elapsed() >= delay * 2);
}

#[tokio::test]
async fn empty_batch_sends_nothing() {
    let server = echo_server(Duration::ZERO).await;
    let config = config_for(&server);
    let client = OpenAiClient::from_config(&config).unwrap();

    let results = process_batch(&client, &config, &[]).await;

    assert!(results.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
