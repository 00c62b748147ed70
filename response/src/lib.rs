use serde::{Deserialize, Serialize};

pub mod embeddings;
pub mod native;

pub use embeddings::EmbeddingsResponse;
pub use native::CompletionResponse;

/// Generated text plus the token counters, when the provider reported them.
///
/// Both transports reduce their responses to this.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Generation {
    pub text: String,
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Non-streaming body of `chat/completions`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatCompletionsResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub created: Option<i64>,
    pub id: Option<String>,
    pub model: Option<String>,
    pub object: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResponseMessage {
    #[serde(default = "assistant_role")]
    pub role: String,
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    pub function: Function,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

fn assistant_role() -> String {
    "assistant".to_string()
}

fn function_type() -> String {
    request::tool::FUNCTION_TOOL_TYPE.to_string()
}

impl ChatCompletionsResponse {
    pub fn builder() -> ChatCompletionsResponseBuilder {
        ChatCompletionsResponseBuilder::default()
    }

    /// The message of the first choice, if there is one.
    pub fn first_message(&self) -> Option<&ResponseMessage> {
        self.choices.first().map(|choice| &choice.message)
    }

    /// `None` when the provider returned no choices; missing content reads as empty text.
    pub fn into_generation(self) -> Option<Generation> {
        let usage = self.usage;
        self.choices.into_iter().next().map(|choice| Generation {
            text: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

impl ResponseMessage {
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }
}

impl From<ToolCall> for request::ToolCall {
    fn from(tool_call: ToolCall) -> Self {
        request::ToolCall {
            id: tool_call.id,
            tool_type: tool_call.tool_type,
            function: request::FunctionCall {
                name: tool_call.function.name,
                arguments: tool_call.function.arguments,
            },
        }
    }
}

/// The assistant turn as it must be replayed in the conversation history.
impl From<ResponseMessage> for request::Message {
    fn from(message: ResponseMessage) -> Self {
        let tool_calls = message
            .tool_calls
            .filter(|tool_calls| !tool_calls.is_empty())
            .map(|tool_calls| tool_calls.into_iter().map(Into::into).collect());

        request::Message::Assistant {
            content: message.content,
            tool_calls,
        }
    }
}

#[derive(Default)]
pub struct ChatCompletionsResponseBuilder {
    choices: Vec<Choice>,
    created: Option<i64>,
    id: Option<String>,
    model: Option<String>,
    usage: Option<Usage>,
}

impl ChatCompletionsResponseBuilder {
    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Append a plain-text assistant choice.
    pub fn content(self, content: &str) -> Self {
        let index = self.choices.len() as u32;
        self.choice(Choice {
            index,
            message: ResponseMessage {
                role: assistant_role(),
                content: Some(content.to_string()),
                tool_calls: None,
            },
            finish_reason: Some("stop".to_string()),
        })
    }

    /// Append an assistant choice that only calls tools.
    pub fn tool_calls(self, tool_calls: Vec<ToolCall>) -> Self {
        let index = self.choices.len() as u32;
        self.choice(Choice {
            index,
            message: ResponseMessage {
                role: assistant_role(),
                content: None,
                tool_calls: Some(tool_calls),
            },
            finish_reason: Some("tool_calls".to_string()),
        })
    }

    pub fn created(mut self, created: Option<i64>) -> Self {
        self.created = created;
        self
    }

    pub fn id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn usage(mut self, usage: Option<Usage>) -> Self {
        self.usage = usage;
        self
    }

    pub fn build(self) -> ChatCompletionsResponse {
        ChatCompletionsResponse {
            choices: self.choices,
            created: self.created,
            id: self.id,
            model: self.model,
            object: Some("chat.completion".to_string()),
            usage: self.usage,
        }
    }
}

impl ToolCall {
    pub fn function(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            tool_type: function_type(),
            function: Function {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_provider_response() {
        let response: ChatCompletionsResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "object": "chat.completion",
            "created": 1760000000,
            "model": "yandexgpt-lite",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Lists are mutable." },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25 }
        }))
        .unwrap();

        assert_eq!(
            response.into_generation(),
            Some(Generation {
                text: "Lists are mutable.".to_string(),
                usage: Some(Usage {
                    prompt_tokens: 20,
                    completion_tokens: 5,
                    total_tokens: 25,
                }),
            })
        );
    }

    #[test]
    fn no_choices_means_no_generation() {
        let response: ChatCompletionsResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(response.first_message().is_none());
        assert_eq!(response.into_generation(), None);
    }

    #[test]
    fn null_content_is_empty_text() {
        let response: ChatCompletionsResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": null } }]
        }))
        .unwrap();
        assert_eq!(response.into_generation().unwrap().text, "");
    }

    #[test]
    fn tool_call_reply_becomes_assistant_history_entry() {
        let response = ChatCompletionsResponse::builder()
            .tool_calls(vec![ToolCall::function(
                "call_1",
                "get_current_weather",
                r#"{"location":"Moscow"}"#,
            )])
            .build();

        let message = response.first_message().cloned().unwrap();
        assert!(message.has_tool_calls());

        let history: request::Message = message.into();
        assert_eq!(history.role(), "assistant");
        assert_eq!(history.tool_calls().len(), 1);
        assert_eq!(history.tool_calls()[0].function.name, "get_current_weather");
        assert_eq!(history.tool_calls()[0].tool_type, "function");
    }

    #[test]
    fn missing_tool_type_defaults_to_function() {
        let call: ToolCall = serde_json::from_value(json!({
            "id": "call_1",
            "function": { "name": "get_current_weather", "arguments": "{}" }
        }))
        .unwrap();
        assert_eq!(call.tool_type, "function");
    }
}
