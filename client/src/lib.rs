//! # YandexGPT Client
//!
//! Async clients for the YandexGPT API over its two transports.
//!
//! ## Features
//!
//! - **OpenAI-compatible path**: [`OpenAiClient`] for `chat/completions` and `embeddings`
//! - **Native path**: [`NativeClient`] for `foundationModels/v1/completion`
//! - **Empty-string sentinel**: `generate_text` on either client logs failures and returns `""`
//! - **Bounded batches**: [`batch::process_batch`] caps in-flight requests with a semaphore
//! - **Tool calling**: [`ToolConversation`] round-trips function calls back to the model
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use client::{GenerationOptions, OpenAiClient};
//! use common::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let client = OpenAiClient::from_config(&config)?;
//!
//!     let options = GenerationOptions::new(&config).system_prompt("You are a helpful assistant.");
//!     let answer = client.generate_text("Why is the sky blue?", &options).await;
//!
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod completion;
pub mod conversation;
pub mod error;
pub mod event;
pub mod native;
pub mod openai;
pub mod similarity;
pub mod tool;
mod transport;

pub use completion::GenerationOptions;
pub use conversation::{ConversationOutcome, ToolConversation};
pub use error::ClientError;
pub use event::{ChatEventHandler, LoggingEventHandler};
pub use native::NativeClient;
pub use openai::OpenAiClient;
pub use tool::{Tool, ToolResult};
