use anyhow::Result;
use client::NativeClient;
use client::native::DEFAULT_SYSTEM_PROMPT;
use common::{AppConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    let client = NativeClient::from_config(&config)?;

    let response = client
        .generate_text(
            "Explain why the sky is blue in one short sentence.",
            DEFAULT_SYSTEM_PROMPT,
        )
        .await;

    if !response.is_empty() {
        println!("\n--- YandexGPT (Native) Response ---");
        println!("{response}");
    }

    Ok(())
}
