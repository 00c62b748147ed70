use anyhow::Result;
use client::{GenerationOptions, OpenAiClient};
use common::{AppConfig, logging};
use tracing::{error, info, warn};

const QUESTION: &str = "Explain the difference between Vec and arrays in Rust.";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    println!("Starting Basic Usage Demo...");

    let config = AppConfig::load()?;
    let client = OpenAiClient::from_config(&config)?;

    // Lower temperature for more factual answers.
    let options = GenerationOptions::new(&config)
        .system_prompt("You are a senior Rust instructor. Be concise and use code examples.")
        .temperature(Some(0.3))
        .max_tokens(Some(1000));

    info!("Sending request to model: {}", config.model_name);

    match client.generate(QUESTION, &options).await {
        Ok(Some(generation)) => {
            let rule = "=".repeat(40);
            println!("\n{rule}");
            println!("Question: {QUESTION}");
            println!("{}", "-".repeat(40));
            println!("Answer:\n{}", generation.text);
            println!("{rule}\n");

            if let Some(usage) = generation.usage {
                info!(
                    "Token usage - Prompt: {}, Completion: {}, Total: {}",
                    usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                );
            }
        }
        Ok(None) => warn!("No choices returned from the model."),
        Err(e) => error!("API request failed: {}", e),
    }

    println!("Demo finished.");
    Ok(())
}
