use anyhow::bail;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use tracing::{debug, error};

pub const DEFAULT_MODEL_NAME: &str = "yandexgpt-lite";
pub const DEFAULT_TEMPERATURE: f64 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const NATIVE_API_URL: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const OPENAI_BASE_URL: &str = "https://ai.api.cloud.yandex.net/v1";
pub const DEFAULT_EMBEDDING_DOC_MODEL: &str = "text-search-doc";
pub const DEFAULT_EMBEDDING_QUERY_MODEL: &str = "text-search-query";
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE: &str = "yandexgpt";
const ENV_PREFIX: &str = "YC";

/// Settings shared by every client and demo.
///
/// Built once at startup and only ever handed out by reference or clone afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub folder_id: String,
    #[serde(default)]
    pub api_key: String,
    pub model_name: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub native_api_url: String,
    pub openai_base_url: String,
    pub embedding_doc_model: String,
    pub embedding_query_model: String,
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Credentials plus the built-in defaults for everything else.
    pub fn new(folder_id: &str, api_key: &str) -> Self {
        Self {
            folder_id: folder_id.to_string(),
            api_key: api_key.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            native_api_url: NATIVE_API_URL.to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            embedding_doc_model: DEFAULT_EMBEDDING_DOC_MODEL.to_string(),
            embedding_query_model: DEFAULT_EMBEDDING_QUERY_MODEL.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Load from `.env`, an optional `yandexgpt.{toml,yaml,json}` file and `YC_*` variables,
    /// in increasing order of precedence.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let settings = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Config) -> anyhow::Result<Self> {
        let config: AppConfig = settings.try_deserialize()?;
        config.validated()
    }

    fn validated(mut self) -> anyhow::Result<Self> {
        self.folder_id = self.folder_id.trim().to_string();
        self.api_key = self.api_key.trim().to_string();

        if self.folder_id.is_empty() || self.api_key.is_empty() {
            error!("Missing required environment variables: YC_FOLDER_ID or YC_API_KEY.");
            bail!("Missing required environment variables: YC_FOLDER_ID or YC_API_KEY");
        }

        Ok(self)
    }

    /// `gpt://<folder>/<model>/latest`
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}/latest", self.folder_id, self.model_name)
    }

    pub fn embedding_doc_uri(&self) -> String {
        embedding_uri(&self.folder_id, &self.embedding_doc_model)
    }

    pub fn embedding_query_uri(&self) -> String {
        embedding_uri(&self.folder_id, &self.embedding_query_model)
    }
}

fn embedding_uri(folder_id: &str, model: &str) -> String {
    format!("emb://{folder_id}/{model}/latest")
}

/// Builder pre-seeded with every default except the credentials.
pub fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("model_name", DEFAULT_MODEL_NAME)?
        .set_default("temperature", DEFAULT_TEMPERATURE)?
        .set_default("max_tokens", i64::from(DEFAULT_MAX_TOKENS))?
        .set_default("native_api_url", NATIVE_API_URL)?
        .set_default("openai_base_url", OPENAI_BASE_URL)?
        .set_default("embedding_doc_model", DEFAULT_EMBEDDING_DOC_MODEL)?
        .set_default("embedding_query_model", DEFAULT_EMBEDDING_QUERY_MODEL)?
        .set_default(
            "max_concurrent_requests",
            DEFAULT_MAX_CONCURRENT_REQUESTS as i64,
        )?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(folder_id: &str, api_key: &str) -> Config {
        defaults()
            .unwrap()
            .set_override("folder_id", folder_id)
            .unwrap()
            .set_override("api_key", api_key)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_fill_everything_but_credentials() {
        let config = AppConfig::from_settings(settings("b1gfolder", "secret")).unwrap();
        assert_eq!(config, AppConfig::new("b1gfolder", "secret"));
    }

    #[test]
    fn credentials_are_trimmed() {
        let config = AppConfig::from_settings(settings("  b1gfolder\n", " secret ")).unwrap();
        assert_eq!(config.folder_id, "b1gfolder");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let err = AppConfig::from_settings(settings("b1gfolder", "   ")).unwrap_err();
        assert!(err.to_string().contains("YC_API_KEY"));

        let missing = defaults().unwrap().build().unwrap();
        assert!(AppConfig::from_settings(missing).is_err());
    }

    #[test]
    fn overrides_take_precedence_over_defaults() {
        let settings = defaults()
            .unwrap()
            .set_override("folder_id", "f")
            .unwrap()
            .set_override("api_key", "k")
            .unwrap()
            .set_override("model_name", "yandexgpt")
            .unwrap()
            .set_override("max_concurrent_requests", 2)
            .unwrap()
            .build()
            .unwrap();

        let config = AppConfig::from_settings(settings).unwrap();
        assert_eq!(config.model_name, "yandexgpt");
        assert_eq!(config.max_concurrent_requests, 2);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn prefixed_environment_maps_onto_fields() {
        let env = [
            ("YC_FOLDER_ID", " b1gfolder "),
            ("YC_API_KEY", "secret"),
            ("YC_TEMPERATURE", "0.25"),
            ("YC_MAX_TOKENS", "1500"),
            ("YC_MAX_CONCURRENT_REQUESTS", "2"),
            ("OTHER_MAX_TOKENS", "9"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let settings = defaults()
            .unwrap()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(env)))
            .build()
            .unwrap();

        let config = AppConfig::from_settings(settings).unwrap();
        assert_eq!(config.folder_id, "b1gfolder");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.temperature, 0.25);
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.max_concurrent_requests, 2);
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
    }

    #[test]
    fn model_uris() {
        let config = AppConfig::new("b1gfolder", "secret");
        assert_eq!(config.model_uri(), "gpt://b1gfolder/yandexgpt-lite/latest");
        assert_eq!(
            config.embedding_doc_uri(),
            "emb://b1gfolder/text-search-doc/latest"
        );
        assert_eq!(
            config.embedding_query_uri(),
            "emb://b1gfolder/text-search-query/latest"
        );
    }
}
