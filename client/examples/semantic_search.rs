use anyhow::{Result, bail};
use client::OpenAiClient;
use client::batch::preview;
use client::similarity::{best_match, scores};
use common::{AppConfig, logging};
use tracing::info;

const DOCUMENTS: [&str; 4] = [
    "Rust is a systems programming language focused on safety and performance.",
    "NVIDIA A100 is a powerful GPU designed for AI and High Performance Computing.",
    "Alexander Pushkin was a Russian poet, playwright, and novelist of the Romantic era.",
    "Docker allows you to package applications into containers for easy deployment.",
];

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    let client = OpenAiClient::from_config(&config)?;

    println!("--- Semantic Search Demo (Docs: {}) ---", DOCUMENTS.len());

    // Documents and queries use separate embedding models.
    info!("Generating embeddings for documents...");
    let doc_uri = config.embedding_doc_uri();
    let mut doc_embeddings = Vec::with_capacity(DOCUMENTS.len());
    for doc in DOCUMENTS {
        doc_embeddings.push(client.embed(doc, &doc_uri).await?);
    }

    let query = "Tell me about graphics cards for Deep Learning";
    println!("\nQuery: '{query}'");
    let query_embedding = client.embed(query, &config.embedding_query_uri()).await?;

    let Some((best_idx, best_score)) = best_match(&query_embedding, &doc_embeddings) else {
        bail!("No documents to search");
    };

    println!("\n>>> Best Match:");
    println!("Score: {best_score:.4}");
    println!("Text:  {}", DOCUMENTS[best_idx]);

    println!("\n(All scores:)");
    for (doc, score) in DOCUMENTS.iter().zip(scores(&query_embedding, &doc_embeddings)) {
        println!("[{score:.4}] {}...", preview(doc, 40));
    }

    Ok(())
}
