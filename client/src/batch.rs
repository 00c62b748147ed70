use common::AppConfig;
use futures::future::join_all;
use std::future::Future;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::completion::GenerationOptions;
use crate::openai::OpenAiClient;

pub const BATCH_SYSTEM_PROMPT: &str = "You are a concise technical expert.";
pub const BATCH_MAX_TOKENS: u32 = 1000;

/// Run `f` over every item with at most `limit` futures in flight at once.
///
/// Results come back in input order. A `limit` of zero is treated as one.
pub async fn run_bounded<T, R, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: usize,
    f: F,
) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let semaphore = Semaphore::new(limit.max(1));

    let tasks = items.into_iter().map(|item| {
        let semaphore = &semaphore;
        let task = f(item);
        async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("Semaphore should not be closed");
            task.await
        }
    });

    join_all(tasks).await
}

/// Complete every prompt, at most `config.max_concurrent_requests` at a time.
///
/// Always returns one entry per prompt; failed prompts yield an empty string.
pub async fn process_batch(
    client: &OpenAiClient,
    config: &AppConfig,
    prompts: &[String],
) -> Vec<String> {
    let options = GenerationOptions::new(config)
        .system_prompt(BATCH_SYSTEM_PROMPT)
        .max_tokens(Some(BATCH_MAX_TOKENS));

    info!("Starting batch processing of {} items...", prompts.len());

    run_bounded(prompts, config.max_concurrent_requests, |prompt| {
        fetch_completion_safe(client, prompt, &options)
    })
    .await
}

async fn fetch_completion_safe(
    client: &OpenAiClient,
    prompt: &str,
    options: &GenerationOptions,
) -> String {
    debug!("Processing prompt: {}...", preview(prompt, 30));

    match client.generate(prompt, options).await {
        Ok(Some(generation)) => generation.text,
        Ok(None) => {
            warn!("No choices returned for prompt: {}", preview(prompt, 20));
            String::new()
        }
        Err(e) => {
            error!(
                "Async request failed for prompt '{}': {}",
                preview(prompt, 20),
                e
            );
            String::new()
        }
    }
}

/// At most `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}
