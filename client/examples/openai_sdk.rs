use anyhow::Result;
use client::{GenerationOptions, OpenAiClient};
use common::{AppConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    let client = OpenAiClient::from_config(&config)?;

    let options = GenerationOptions::new(&config).system_prompt("You are a helpful AI assistant.");
    let result = client
        .generate_text(
            "Write a Rust function to check if a number is prime.",
            &options,
        )
        .await;

    if !result.is_empty() {
        println!("\n--- YandexGPT (OpenAI-compatible) Response ---");
        println!("{result}");
    }

    Ok(())
}
