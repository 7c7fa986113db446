//! Shared HTTP client for talking to completion endpoints.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total time allowed for a single request
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

pub type Inspector = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Hooks that see raw request and response bodies.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    pub request_inspector: Option<Inspector>,
    pub response_inspector: Option<Inspector>,
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

/// Thin wrapper over `reqwest` that classifies failures into [`LlmError`].
///
/// Each call is sent exactly once.
pub struct HttpClient {
    client: reqwest::Client,
    inspector_config: Option<InspectorConfig>,
}

impl HttpClient {
    pub fn new(
        config: HttpClientConfig,
        user_agent: Option<&str>,
        inspector_config: Option<InspectorConfig>,
    ) -> Result<Self, LlmError> {
        let default_ua = format!("hello-genai/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            client,
            inspector_config,
        })
    }

    /// POST a JSON body and deserialize the JSON answer.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let body_value = serde_json::to_value(body).map_err(|e| LlmError::Parse {
            message: "Failed to serialize request".to_string(),
            source: Box::new(e),
        })?;

        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|c| c.request_inspector.as_ref())
        {
            inspector(&body_value);
        }

        let mut req_builder = self.client.post(url).json(&body_value);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else {
                "Failed to complete request".to_string()
            };
            LlmError::Network {
                message,
                source: Box::new(e),
            }
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            self.inspect_response(serde_json::from_str(&response_text).unwrap_or_else(|_| {
                serde_json::json!({
                    "error": response_text,
                    "status_code": status.as_u16()
                })
            }));
            return Err(LlmError::from_status(status.as_u16(), &response_text));
        }

        debug!(status = %status, "HTTP request successful");

        let response_value: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
                message: "Failed to parse response as JSON".to_string(),
                source: Box::new(e),
            })?;

        self.inspect_response(response_value.clone());

        serde_json::from_value(response_value).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }

    fn inspect_response(&self, value: serde_json::Value) {
        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|c| c.response_inspector.as_ref())
        {
            inspector(&value);
        }
    }
}
