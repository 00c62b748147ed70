use serde::{Deserialize, Serialize};

pub const FLOAT_ENCODING: &str = "float";

/// Body of `POST {base_url}/embeddings`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EmbeddingsRequest {
    pub input: Vec<String>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,
}

impl EmbeddingsRequest {
    pub fn new(model: &str, input: Vec<String>) -> Self {
        Self {
            input,
            model: model.to_string(),
            encoding_format: Some(FLOAT_ENCODING.to_string()),
        }
    }
}
