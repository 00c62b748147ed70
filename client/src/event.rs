use anyhow::Result;
use response::Usage;
use tracing::{info, warn};

/// Observer for the steps of a tool conversation. An error from any callback
/// aborts the conversation.
pub trait ChatEventHandler: Send + Sync {
    fn on_tool_start(&self, tool_count: usize) -> Result<()>;
    fn on_tool_call(&self, name: &str, args: &str) -> Result<()>;
    fn on_tool_result(&self, name: &str, result: &str) -> Result<()>;
    fn on_tool_error(&self, name: &str, error: &str) -> Result<()>;
    fn on_continuation(&self) -> Result<()>;
    fn on_usage(&self, usage: &Usage) -> Result<()>;
}

/// Reports every event through `tracing`.
pub struct LoggingEventHandler;

impl ChatEventHandler for LoggingEventHandler {
    fn on_tool_start(&self, tool_count: usize) -> Result<()> {
        info!("Model requested {} tool call(s)", tool_count);
        Ok(())
    }

    fn on_tool_call(&self, name: &str, args: &str) -> Result<()> {
        info!("--> Tool called: {}({})", name, args);
        Ok(())
    }

    fn on_tool_result(&self, name: &str, result: &str) -> Result<()> {
        info!("<-- Tool {} returned {}", name, result);
        Ok(())
    }

    fn on_tool_error(&self, name: &str, error: &str) -> Result<()> {
        warn!("Tool {} failed: {}", name, error);
        Ok(())
    }

    fn on_continuation(&self) -> Result<()> {
        info!("Sending results back to model...");
        Ok(())
    }

    fn on_usage(&self, usage: &Usage) -> Result<()> {
        info!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
        Ok(())
    }
}
