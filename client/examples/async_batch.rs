use anyhow::Result;
use client::OpenAiClient;
use client::batch::{preview, process_batch};
use common::{AppConfig, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    let client = OpenAiClient::from_config(&config)?;

    let prompts: Vec<String> = [
        "Explain NVIDIA A100 Tensor Cores.",
        "What is the difference between FP32 and BF16?",
        "How does Gradient Accumulation work?",
        "Explain Data Parallelism vs Model Parallelism.",
        "What is NCCL in distributed training?",
        "Optimize a matrix multiplication in Rust.",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let results = tokio::select! {
        results = process_batch(&client, &config, &prompts) => results,
        _ = tokio::signal::ctrl_c() => {
            info!("Batch processing interrupted by user.");
            return Ok(());
        }
    };

    println!("\n--- Batch Processing Results ---");
    for (prompt, answer) in prompts.iter().zip(&results) {
        println!("\nQ: {prompt}");
        let flat = answer.replace('\n', " ");
        println!("A: {}... (truncated)", preview(&flat, 100));
    }

    Ok(())
}
