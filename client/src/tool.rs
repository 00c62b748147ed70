use anyhow::Result;
use async_trait::async_trait;
use request::Message;
use request::tool::Tool as RequestTool;

/// A local function the model can ask to run.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised to the model in the `tools` list.
    fn definition(&self) -> RequestTool;

    /// Run with the decoded arguments object and return the content sent back to the model.
    async fn execute(&self, args: &serde_json::Value) -> Result<String>;
}

pub struct ToolResult {
    pub id: String,
    pub name: String,
    pub result: String,
}

impl From<ToolResult> for Message {
    fn from(tool_result: ToolResult) -> Self {
        Message::tool(&tool_result.id, &tool_result.name, &tool_result.result)
    }
}
