//! Application settings shared by the completion client and the review pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::completions::CompletionClient;
use crate::core::{HttpClientConfig, LlmError, types::DEFAULT_TEMPERATURE};
use crate::provider::{OpenAiClient, OpenAiConfig, Provider, constants};
use crate::reviews::{DEFAULT_BIN_COUNT, ReviewSession};

pub const DEFAULT_DATASET_PATH: &str = "data/customer_reviews.csv";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the provider's environment variable, e.g. `OPENAI_API_KEY`.
    Default,
    Custom(String),
}

impl ApiKey {
    /// Resolve to a key. Blank values count as missing.
    pub fn resolve(&self, provider: Provider) -> Option<String> {
        let key = match self {
            ApiKey::Default => std::env::var(provider.default_api_key_env_var()).ok()?,
            ApiKey::Custom(key) => key.clone(),
        };
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub default_temperature: f32,
    pub dataset_path: PathBuf,
    /// Zero disables the response cache.
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub bin_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: constants::openai::API_BASE.to_string(),
            model: constants::openai::DEFAULT_MODEL.to_string(),
            default_temperature: DEFAULT_TEMPERATURE,
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: HttpClientConfig::default().timeout,
            bin_count: DEFAULT_BIN_COUNT,
        }
    }
}

impl AppConfig {
    /// Defaults with the API key and base URL taken from the environment.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: ApiKey::Default.resolve(Provider::OpenAI),
            ..Self::default()
        };
        if let Ok(base_url) = std::env::var(constants::openai::BASE_URL_ENV_VAR) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = api_key.resolve(Provider::OpenAI);
        self
    }

    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_http_config(HttpClientConfig {
                timeout: self.request_timeout,
            })
    }

    pub fn completion_client(&self) -> Result<CompletionClient<OpenAiClient>, LlmError> {
        let provider = OpenAiClient::new(self.openai_config())?;
        Ok(CompletionClient::with_cache_ttl(provider, self.cache_ttl))
    }

    pub fn review_session(&self) -> ReviewSession {
        ReviewSession::new(self.bin_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_key_is_trimmed_and_blank_is_missing() {
        assert_eq!(
            ApiKey::Custom("  sk-abc \n".into()).resolve(Provider::OpenAI),
            Some("sk-abc".to_string())
        );
        assert_eq!(ApiKey::Custom("   ".into()).resolve(Provider::OpenAI), None);
    }

    #[test]
    fn defaults_match_the_demo() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.default_temperature, 0.7);
        assert_eq!(config.dataset_path, PathBuf::from("data/customer_reviews.csv"));
        assert_eq!(config.bin_count, 10);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn openai_config_carries_settings() {
        let config = AppConfig {
            base_url: "http://localhost:9999/".into(),
            model: "gpt-test".into(),
            request_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        }
        .with_api_key(ApiKey::Custom("sk-test".into()));

        let openai = config.openai_config();
        assert_eq!(openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(openai.base_url, "http://localhost:9999");
        assert_eq!(openai.model, "gpt-test");
        assert_eq!(openai.max_tokens, 100);
        assert_eq!(openai.http_config.timeout, Duration::from_secs(5));
    }
}
