use serde::{Deserialize, Serialize};

use crate::ToolCall;

/// A chat message, tagged by `role` on the wire.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Message {
    pub fn system(content: &str) -> Self {
        Message::System {
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Message::User {
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Message::Assistant {
            content: Some(content.to_string()),
            tool_calls: None,
        }
    }

    /// The reply to the tool call with `tool_call_id`.
    pub fn tool(tool_call_id: &str, name: &str, content: &str) -> Self {
        Message::Tool {
            content: content.to_string(),
            tool_call_id: tool_call_id.to_string(),
            name: Some(name.to_string()),
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Message::System { .. } => "system",
            Message::User { .. } => "user",
            Message::Assistant { .. } => "assistant",
            Message::Tool { .. } => "tool",
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Tool { content, .. } => Some(content.as_str()),
            Message::Assistant { content, .. } => content.as_deref(),
        }
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant {
                tool_calls: Some(tool_calls),
                ..
            } => tool_calls,
            _ => &[],
        }
    }
}
