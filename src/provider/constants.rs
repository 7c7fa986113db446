pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    pub const API_BASE: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
    pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
    pub const MAX_OUTPUT_TOKENS: u32 = 100;
}
