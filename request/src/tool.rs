use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const FUNCTION_TOOL_TYPE: &str = "function";

/// A tool the model may call, as listed in `tools`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: ToolFunction,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolFunction {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema of the arguments object.
    pub parameters: serde_json::Value,
}

impl Tool {
    pub fn function(name: &str, description: Option<&str>, parameters: serde_json::Value) -> Self {
        Self {
            tool_type: FUNCTION_TOOL_TYPE.to_string(),
            function: ToolFunction {
                name: name.to_string(),
                description: description.map(str::to_string),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionCall,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments object, exactly as the model produced it.
    pub arguments: String,
}

impl FunctionCall {
    /// Decode the arguments; blank arguments read as `{}`.
    pub fn parse_arguments(&self) -> anyhow::Result<serde_json::Value> {
        let arguments = if self.arguments.trim().is_empty() {
            "{}"
        } else {
            self.arguments.as_str()
        };

        serde_json::from_str(arguments)
            .with_context(|| format!("Invalid arguments for {}: {}", self.name, self.arguments))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ToolChoice {
    Mode(String),
    Function {
        #[serde(rename = "type")]
        tool_type: String,
        function: ToolChoiceFunction,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ToolChoiceFunction {
    pub name: String,
}

impl ToolChoice {
    /// Let the model decide whether to call a tool.
    pub fn auto() -> Self {
        ToolChoice::Mode("auto".to_string())
    }

    pub fn none() -> Self {
        ToolChoice::Mode("none".to_string())
    }

    /// Force a call to the named function.
    pub fn function(name: &str) -> Self {
        ToolChoice::Function {
            tool_type: FUNCTION_TOOL_TYPE.to_string(),
            function: ToolChoiceFunction {
                name: name.to_string(),
            },
        }
    }
}
