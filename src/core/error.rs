use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Everything that can go wrong between a prompt and the model's answer.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),
}

impl LlmError {
    /// Whether the same request could succeed if sent again later.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } | LlmError::Network { .. } => true,
            LlmError::Api { status_code, .. } => status_code.is_some_and(|code| code >= 500),
            _ => false,
        }
    }

    /// HTTP status returned by the endpoint, when there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Authentication { status_code, .. } | LlmError::Api { status_code, .. } => {
                *status_code
            }
            LlmError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Classify a non-success HTTP status and its body.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_api_message(body).unwrap_or_else(|| body.trim().to_string());
        match status {
            401 | 403 => LlmError::Authentication {
                message: detail,
                status_code: Some(status),
            },
            429 => LlmError::RateLimited { message: detail },
            _ => LlmError::Api {
                message: format!("status {status}: {detail}"),
                status_code: Some(status),
                source: None,
            },
        }
    }
}

/// Failures of the review pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Dataset not found: {path}")]
    NotFound { path: String },

    #[error("No dataset loaded. Ingest the dataset first.")]
    PreconditionUnmet,

    #[error("Dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("Row {row}: sentiment score `{value}` is not a finite number")]
    InvalidScore { row: usize, value: String },

    #[error("Column `{field}` has a non-numeric value `{value}`")]
    NonNumericField { field: String, value: String },

    #[error("Histogram needs at least one bin")]
    InvalidBinCount,

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// OpenAI-style error bodies look like `{"error": {"message": "..."}}`.
fn extract_api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_statuses() {
        let err = LlmError::from_status(401, r#"{"error":{"message":"Incorrect API key"}}"#);
        assert!(matches!(
            err,
            LlmError::Authentication {
                status_code: Some(401),
                ..
            }
        ));
        assert_eq!(err.to_string(), "Authentication error: Incorrect API key");
        assert!(!err.is_retryable());
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(LlmError::from_status(429, "quota exceeded").is_retryable());
        assert!(LlmError::from_status(503, "").is_retryable());
        assert!(!LlmError::from_status(400, "bad request").is_retryable());
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = LlmError::from_status(500, "  upstream exploded \n");
        assert_eq!(err.to_string(), "API error: status 500: upstream exploded");
        assert_eq!(err.status_code(), Some(500));
    }
}
