use super::error::LlmError;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatRole {
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

/// A single prompt plus its sampling temperature.
///
/// Text is never empty and the temperature always sits in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    text: String,
    temperature: f32,
}

impl PromptRequest {
    /// Build a request, clamping the temperature into range.
    pub fn new(text: impl Into<String>, temperature: f32) -> Result<Self, LlmError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(LlmError::InvalidRequest("Prompt must not be empty".to_string()));
        }
        if !temperature.is_finite() {
            return Err(LlmError::InvalidRequest(format!(
                "Temperature must be a number, got {temperature}"
            )));
        }

        Ok(Self {
            text,
            temperature: temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// The prompt as the only message of a conversation.
    pub fn to_messages(&self) -> Vec<Message> {
        vec![Message {
            role: ChatRole::User,
            content: self.text.clone(),
        }]
    }
}

/// Outcome of one completion call.
#[derive(Debug)]
pub enum CompletionResult {
    Success { text: String },
    Failure { error: LlmError },
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CompletionResult::Success { text } => Some(text),
            CompletionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&LlmError> {
        match self {
            CompletionResult::Success { .. } => None,
            CompletionResult::Failure { error } => Some(error),
        }
    }

    /// Human-readable error message, for failures.
    pub fn message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    pub fn into_result(self) -> Result<String, LlmError> {
        self.into()
    }
}

impl From<Result<String, LlmError>> for CompletionResult {
    fn from(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => CompletionResult::Success { text },
            Err(error) => CompletionResult::Failure { error },
        }
    }
}

impl From<CompletionResult> for Result<String, LlmError> {
    fn from(result: CompletionResult) -> Self {
        match result {
            CompletionResult::Success { text } => Ok(text),
            CompletionResult::Failure { error } => Err(error),
        }
    }
}
