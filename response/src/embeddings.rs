use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EmbeddingsResponse {
    #[serde(default)]
    pub data: Vec<Embedding>,
    pub model: Option<String>,
    pub usage: Option<EmbeddingsUsage>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Embedding {
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub index: usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EmbeddingsUsage {
    pub prompt_tokens: u64,
    pub total_tokens: u64,
}

impl EmbeddingsResponse {
    /// Vectors in input order, whatever order the provider listed them in.
    pub fn into_vectors(mut self) -> Vec<Vec<f64>> {
        self.data.sort_by_key(|embedding| embedding.index);
        self.data
            .into_iter()
            .map(|embedding| embedding.embedding)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vectors_follow_input_order() {
        let response: EmbeddingsResponse = serde_json::from_value(json!({
            "object": "list",
            "data": [
                { "object": "embedding", "index": 1, "embedding": [0.0, 1.0] },
                { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] }
            ],
            "model": "text-search-doc"
        }))
        .unwrap();

        assert_eq!(
            response.into_vectors(),
            vec![vec![1.0, 0.0], vec![0.0, 1.0]]
        );
    }
}
