use anyhow::Result;
use async_trait::async_trait;
use client::{OpenAiClient, Tool, ToolConversation};
use common::{AppConfig, logging};
use request::Message;
use request::tool::Tool as RequestTool;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Canned weather lookup.
struct CurrentWeather;

#[async_trait]
impl Tool for CurrentWeather {
    fn definition(&self) -> RequestTool {
        RequestTool::function(
            "get_current_weather",
            Some("Get the current weather in a given location."),
            json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "The city and state, e.g. San Francisco, CA"
                    },
                    "unit": { "type": "string", "enum": ["celsius", "fahrenheit"] }
                },
                "required": ["location"]
            }),
        )
    }

    async fn execute(&self, args: &Value) -> Result<String> {
        let location = args["location"].as_str().unwrap_or_default();
        let unit = args["unit"].as_str().unwrap_or("celsius");
        info!("--> Tool called: get_current_weather({}, {})", location, unit);

        let city = location.to_lowercase();
        let report = if city.contains("moscow") {
            json!({ "location": "Moscow", "temperature": "-5", "unit": unit })
        } else if city.contains("dubai") {
            json!({ "location": "Dubai", "temperature": "30", "unit": unit })
        } else {
            json!({ "location": location, "temperature": "unknown" })
        };

        Ok(report.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    let client = OpenAiClient::from_config(&config)?;

    let user_prompt = "What is the weather like in Moscow today?";
    println!("User: {user_prompt}");

    let mut conversation = ToolConversation::builder(&config.model_uri())
        .message(Message::system("You are a helpful assistant."))
        .message(Message::user(user_prompt))
        .tool(Arc::new(CurrentWeather))
        .build();

    let outcome = conversation.run(&client).await?;

    match outcome.tool_calls.first() {
        Some(call) => {
            println!("AI: I need to call a function: {}", call.function.name);
            println!("AI Final Answer: {}", outcome.answer);
        }
        None => {
            println!("AI didn't call any tools.");
            println!("AI: {}", outcome.answer);
        }
    }

    Ok(())
}
