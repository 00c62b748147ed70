use common::{AppConfig, logging};
use demo::{DEFAULT_PROMPT, run_native_demo, run_sdk_demo};
use tracing::info;

fn print_result(result: Option<String>) {
    match result {
        Some(text) => println!("Result:\n{text}"),
        None => println!("No response received."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    info!("Initializing YandexGPT demo");

    let config = AppConfig::load()?;
    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());

    println!("--- YandexGPT Demo (Model: {}) ---", config.model_name);
    println!("Prompt: '{prompt}'");

    println!("\n>>> [1] Running Native API Request...");
    print_result(run_native_demo(&config, &prompt).await);

    println!("\n>>> [2] Running OpenAI-compatible Request...");
    print_result(run_sdk_demo(&config, &prompt).await);

    println!("\n--- Demo Finished ---");
    Ok(())
}
