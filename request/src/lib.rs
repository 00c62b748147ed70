use serde::{Deserialize, Serialize};

pub mod embeddings;
pub mod message;
pub mod native;
pub mod tool;

pub use embeddings::EmbeddingsRequest;
pub use message::Message;
pub use tool::{FunctionCall, Tool, ToolCall, ToolChoice, ToolFunction};

/// Body of `POST {base_url}/chat/completions`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl ChatCompletionsRequest {
    pub fn builder(model: &str) -> ChatCompletionsRequestBuilder {
        ChatCompletionsRequestBuilder {
            model: model.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Default)]
pub struct ChatCompletionsRequestBuilder {
    model: String,
    messages: Vec<Message>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    tools: Option<Vec<Tool>>,
    tool_choice: Option<ToolChoice>,
}

impl ChatCompletionsRequestBuilder {
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// An empty list is sent as no tools at all.
    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    pub fn tool_choice(mut self, tool_choice: Option<ToolChoice>) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    pub fn build(self) -> ChatCompletionsRequest {
        ChatCompletionsRequest {
            model: self.model,
            messages: self.messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            tools: self.tools,
            tool_choice: self.tool_choice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_options_are_omitted() {
        let request = ChatCompletionsRequest::builder("gpt://folder/yandexgpt-lite/latest")
            .message(Message::user("Hi"))
            .build();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt://folder/yandexgpt-lite/latest",
                "messages": [{ "role": "user", "content": "Hi" }]
            })
        );
    }

    #[test]
    fn sampling_options_and_tools_are_serialized() {
        let weather = Tool::function(
            "get_current_weather",
            Some("Get the current weather in a given location."),
            json!({ "type": "object", "properties": {} }),
        );

        let request = ChatCompletionsRequest::builder("m")
            .message(Message::system("You are a helpful assistant."))
            .message(Message::user("Weather in Moscow?"))
            .temperature(Some(0.3))
            .max_tokens(Some(1000))
            .tools(vec![weather])
            .tool_choice(Some(ToolChoice::auto()))
            .build();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["temperature"], json!(0.3));
        assert_eq!(value["max_tokens"], json!(1000));
        assert_eq!(value["tool_choice"], json!("auto"));
        assert_eq!(value["tools"][0]["type"], json!("function"));
        assert_eq!(
            value["tools"][0]["function"]["name"],
            json!("get_current_weather")
        );
        assert_eq!(value["messages"][0]["role"], json!("system"));
    }

    #[test]
    fn empty_tool_list_is_dropped() {
        let request = ChatCompletionsRequest::builder("m").tools(Vec::new()).build();
        assert!(request.tools.is_none());
    }
}
