//! OpenAI chat-completions provider.
//!
//! # API Compatibility
//!
//! Response structs keep fields from the OpenAI documentation even when they are unused.
//! Those fields are marked with `#[allow(dead_code)]` so the wire contract stays visible
//! and the structs can be logged while debugging.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    HttpClient, HttpClientConfig, InspectorConfig, LlmError, LlmProvider, Message, PromptRequest,
};
use crate::provider::constants::openai;

/// Settings for [`OpenAiClient`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// `None` makes every request fail with [`LlmError::Authentication`].
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub http_config: HttpClientConfig,
    pub inspector_config: Option<InspectorConfig>,
}

impl OpenAiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: openai::API_BASE.to_string(),
            model: openai::DEFAULT_MODEL.to_string(),
            max_tokens: openai::MAX_OUTPUT_TOKENS,
            http_config: HttpClientConfig::default(),
            inspector_config: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector_config = Some(inspector);
        self
    }

    fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, openai::CHAT_COMPLETIONS_ENDPOINT)
    }

    fn user_agent(&self) -> String {
        format!("hello-genai/{}", env!("CARGO_PKG_VERSION"))
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(
            config.http_config.clone(),
            Some(&config.user_agent()),
            config.inspector_config.clone(),
        )?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn build_request(&self, request: &PromptRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: request.to_messages().into_iter().map(Into::into).collect(),
            temperature: request.temperature(),
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    #[tracing::instrument(
        name = "openai_chat_completion",
        skip(self, request),
        fields(model = %self.config.model, temperature = request.temperature()),
        err
    )]
    async fn generate_text(&self, request: &PromptRequest) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            LlmError::Authentication {
                message: format!("{} not set", openai::API_KEY_ENV_VAR),
                status_code: None,
            }
        })?;

        let body = self.build_request(request);
        let headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {api_key}"),
        )];

        let response: ChatCompletionResponse = self
            .http
            .post_json(&self.config.endpoint_url(), &headers, &body)
            .await?;

        tracing::debug!(
            id = %response.id,
            choices = response.choices.len(),
            "Received chat completion"
        );

        first_choice_text(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn first_choice_text(response: ChatCompletionResponse) -> Result<String, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse("No choices in response".to_string()))?;

    choice
        .message
        .content
        .ok_or_else(|| LlmError::EmptyResponse("First choice has no content".to_string()))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl From<Message> for ChatMessage {
    fn from(message: Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    id: String,
    #[allow(dead_code)]
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
    #[allow(dead_code)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[allow(dead_code)]
    #[serde(default)]
    index: u32,
    message: ResponseMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    #[serde(default)]
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[allow(dead_code)]
    #[serde(default)]
    prompt_tokens: u32,
    #[allow(dead_code)]
    #[serde(default)]
    completion_tokens: u32,
    #[allow(dead_code)]
    #[serde(default)]
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new(Some("sk-test".into()))).expect("client")
    }

    #[test]
    fn request_has_fixed_model_and_token_limit() {
        let request = PromptRequest::new("Explain generative AI in one sentence.", 0.7).unwrap();
        let body = serde_json::to_value(client().build_request(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 100);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(
            body["messages"][0]["content"],
            "Explain generative AI in one sentence."
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = OpenAiConfig::new(None).with_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn picks_first_choice_verbatim() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "  first \n" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "second" }, "finish_reason": "stop" }
            ]
        }))
        .unwrap();

        assert_eq!(first_choice_text(response).unwrap(), "  first \n");
    }

    #[test]
    fn missing_choices_is_an_empty_response() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "id": "x", "choices": [] })).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(LlmError::EmptyResponse(_))
        ));
    }

    #[test]
    fn partial_usage_still_parses() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "content": "hi" } }],
            "usage": { "total_tokens": 7 }
        }))
        .unwrap();

        assert_eq!(response.usage.as_ref().map(|u| u.total_tokens), Some(7));
        assert_eq!(response.usage.as_ref().map(|u| u.prompt_tokens), Some(0));
        assert_eq!(first_choice_text(response).unwrap(), "hi");
    }
}
