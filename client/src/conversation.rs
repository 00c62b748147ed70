use anyhow::{Result, anyhow, bail};
use request::tool::Tool as RequestTool;
use request::{ChatCompletionsRequest, Message, ToolCall, ToolChoice};
use response::Usage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::event::{ChatEventHandler, LoggingEventHandler};
use crate::openai::OpenAiClient;
use crate::tool::{Tool, ToolResult};

/// Tool rounds allowed before the model must answer: one round is the classic
/// ask / run tools / answer exchange.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 1;

/// A chat whose assistant turns may call local tools.
///
/// Phase one sends the history with the tool list and `tool_choice = "auto"`.
/// If the model asks for tools, its turn and one `tool` message per executed
/// call are appended and the history is sent again, until the model answers
/// without tool calls or the round limit is reached.
pub struct ToolConversation {
    model: String,
    temperature: Option<f64>,
    messages: Vec<Message>,
    tools: HashMap<String, Arc<dyn Tool>>,
    max_tool_rounds: usize,
    handler: Arc<dyn ChatEventHandler>,
}

/// What a finished conversation produced.
#[derive(Debug, Default)]
pub struct ConversationOutcome {
    /// Content of the final assistant turn; empty if the model sent none.
    pub answer: String,
    /// Every tool call the model made, in order.
    pub tool_calls: Vec<ToolCall>,
    /// Number of tool rounds run.
    pub rounds: usize,
    /// Usage reported with the final response.
    pub usage: Option<Usage>,
}

pub struct ToolConversationBuilder {
    model: String,
    temperature: Option<f64>,
    messages: Vec<Message>,
    tools: HashMap<String, Arc<dyn Tool>>,
    max_tool_rounds: usize,
    handler: Arc<dyn ChatEventHandler>,
}

impl ToolConversationBuilder {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature: None,
            messages: Vec::new(),
            tools: HashMap::new(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            handler: Arc::new(LoggingEventHandler),
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Register a tool under the name in its definition. A later tool with the same name replaces it.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.definition().function.name;
        self.tools.insert(name, tool);
        self
    }

    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn handler(mut self, handler: Arc<dyn ChatEventHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn build(self) -> ToolConversation {
        ToolConversation {
            model: self.model,
            temperature: self.temperature,
            messages: self.messages,
            tools: self.tools,
            max_tool_rounds: self.max_tool_rounds,
            handler: self.handler,
        }
    }
}

impl ToolConversation {
    pub fn builder(model: &str) -> ToolConversationBuilder {
        ToolConversationBuilder::new(model)
    }

    /// The history so far, including every assistant and tool turn.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Tool definitions sorted by name, so requests are reproducible.
    pub fn tool_definitions(&self) -> Vec<RequestTool> {
        let mut definitions: Vec<RequestTool> =
            self.tools.values().map(|tool| tool.definition()).collect();
        definitions.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        definitions
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Execute a registered tool by name.
    pub async fn execute_tool(&self, name: &str, args: &serde_json::Value) -> Result<String> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => bail!("Unknown tool: {}", name),
        }
    }

    pub async fn run(&mut self, client: &OpenAiClient) -> Result<ConversationOutcome> {
        if self.messages.is_empty() {
            bail!("No messages to send");
        }

        let mut outcome = ConversationOutcome::default();

        loop {
            let request = self.request(outcome.rounds == 0);
            info!(
                "Sending {} request with {} messages...",
                if outcome.rounds == 0 {
                    "initial"
                } else {
                    "follow-up"
                },
                request.messages.len()
            );

            let response = client.chat_completions(&request).await?;
            if let Some(usage) = &response.usage {
                self.handler.on_usage(usage)?;
            }
            outcome.usage = response.usage.clone();

            let mut message = response
                .first_message()
                .cloned()
                .ok_or_else(|| anyhow!("No choices returned from the model"))?;

            if !message.has_tool_calls() {
                outcome.answer = message.content.clone().unwrap_or_default();
                self.messages.push(message.into());
                return Ok(outcome);
            }

            if outcome.rounds >= self.max_tool_rounds {
                warn!(
                    "Tool round limit of {} reached, ignoring {} further tool call(s)",
                    self.max_tool_rounds,
                    message.tool_calls().len()
                );
                // Unanswered tool calls would make the history invalid to resend.
                message.tool_calls = None;
                outcome.answer = message.content.clone().unwrap_or_default();
                if !outcome.answer.is_empty() {
                    self.messages.push(message.into());
                }
                return Ok(outcome);
            }

            let assistant: Message = message.into();
            let tool_calls = assistant.tool_calls().to_vec();
            self.messages.push(assistant);

            for result in self.execute_tool_calls(&tool_calls).await? {
                self.messages.push(result.into());
            }

            outcome.tool_calls.extend(tool_calls);
            outcome.rounds += 1;
            self.handler.on_continuation()?;
        }
    }

    fn request(&self, initial: bool) -> ChatCompletionsRequest {
        let tools = self.tool_definitions();
        let tool_choice = (initial && !tools.is_empty()).then(ToolChoice::auto);

        ChatCompletionsRequest::builder(&self.model)
            .messages(self.messages.iter().cloned())
            .temperature(self.temperature)
            .tools(tools)
            .tool_choice(tool_choice)
            .build()
    }

    /// Failed and unknown calls are reported to the handler and produce no result.
    async fn execute_tool_calls(&self, tool_calls: &[ToolCall]) -> Result<Vec<ToolResult>> {
        self.handler.on_tool_start(tool_calls.len())?;
        let mut results = Vec::with_capacity(tool_calls.len());

        for tool_call in tool_calls {
            let function = &tool_call.function;
            self.handler.on_tool_call(&function.name, &function.arguments)?;

            match self.execute_tool_call(tool_call).await {
                Ok(result) => {
                    self.handler.on_tool_result(&result.name, &result.result)?;
                    results.push(result);
                }
                Err(e) => self.handler.on_tool_error(&function.name, &e.to_string())?,
            }
        }

        Ok(results)
    }

    async fn execute_tool_call(&self, tool_call: &ToolCall) -> Result<ToolResult> {
        let args = tool_call.function.parse_arguments()?;
        let result = self.execute_tool(&tool_call.function.name, &args).await?;

        Ok(ToolResult {
            id: tool_call.id.clone(),
            name: tool_call.function.name.clone(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn definition(&self) -> RequestTool {
            RequestTool::function("echo", Some("Echo the input."), json!({ "type": "object" }))
        }

        async fn execute(&self, args: &serde_json::Value) -> Result<String> {
            Ok(args.to_string())
        }
    }

    struct Noop;

    #[async_trait]
    impl Tool for Noop {
        fn definition(&self) -> RequestTool {
            RequestTool::function("a_noop", None, json!({ "type": "object" }))
        }

        async fn execute(&self, _args: &serde_json::Value) -> Result<String> {
            Ok(String::new())
        }
    }

    fn conversation() -> ToolConversation {
        ToolConversation::builder("gpt://f/yandexgpt-lite/latest")
            .message(Message::user("hi"))
            .tool(Arc::new(Echo))
            .tool(Arc::new(Noop))
            .build()
    }

    #[test]
    fn definitions_are_sorted_by_name() {
        let names: Vec<String> = conversation()
            .tool_definitions()
            .into_iter()
            .map(|tool| tool.function.name)
            .collect();
        assert_eq!(names, vec!["a_noop", "echo"]);
    }

    #[test]
    fn only_first_request_forces_auto_choice() {
        let conversation = conversation();
        assert_eq!(
            conversation.request(true).tool_choice,
            Some(ToolChoice::auto())
        );
        assert_eq!(conversation.request(false).tool_choice, None);
        assert_eq!(conversation.request(false).tools.map(|t| t.len()), Some(2));
    }

    #[test]
    fn no_tools_means_no_tool_fields() {
        let conversation = ToolConversation::builder("m")
            .message(Message::user("hi"))
            .build();
        let request = conversation.request(true);
        assert!(request.tools.is_none());
        assert!(request.tool_choice.is_none());
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let result = conversation()
            .execute_tool("echo", &json!({ "x": 1 }))
            .await
            .unwrap();
        assert_eq!(result, r#"{"x":1}"#);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let err = conversation()
            .execute_tool("missing", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: missing");
    }

    #[tokio::test]
    async fn failed_calls_produce_no_result() {
        let conversation = conversation();
        let calls = vec![
            ToolCall {
                id: "1".to_string(),
                tool_type: "function".to_string(),
                function: request::FunctionCall {
                    name: "echo".to_string(),
                    arguments: r#"{"q":"ok"}"#.to_string(),
                },
            },
            ToolCall {
                id: "2".to_string(),
                tool_type: "function".to_string(),
                function: request::FunctionCall {
                    name: "missing".to_string(),
                    arguments: "{}".to_string(),
                },
            },
            ToolCall {
                id: "3".to_string(),
                tool_type: "function".to_string(),
                function: request::FunctionCall {
                    name: "echo".to_string(),
                    arguments: "{not json".to_string(),
                },
            },
        ];

        let results = conversation.execute_tool_calls(&calls).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
        assert_eq!(results[0].result, r#"{"q":"ok"}"#);
    }
}
