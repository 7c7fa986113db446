//! # hello-genai
//!
//! Ask a hosted chat model a question, and explore customer review sentiment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hello_genai::{AppConfig, PromptRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AppConfig::from_env().completion_client()?;
//!     let request = PromptRequest::new("Explain generative AI in one sentence.", 0.7)?;
//!
//!     match client.complete(&request).await.into_result() {
//!         Ok(text) => println!("{text}"),
//!         Err(e) => eprintln!("Error: {e}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Reviews are handled by the [`reviews`] module:
//!
//! ```rust,no_run
//! use hello_genai::reviews::{ProductFilter, ReviewSession};
//!
//! let mut session = ReviewSession::default();
//! session.ingest("data/customer_reviews.csv")?;
//! session.clean()?;
//! let view = session.view(&ProductFilter::All)?;
//! println!("{} reviews", view.records.len());
//! # Ok::<(), hello_genai::PipelineError>(())
//! ```

pub mod completions;
pub mod config;
pub mod core;
pub mod display;
pub mod provider;
pub mod reviews;

pub use completions::{CompletionClient, ResponseCache};
pub use config::{ApiKey, AppConfig};
pub use crate::core::{
    ChatRole, CompletionResult, HttpClientConfig, InspectorConfig, LlmError, LlmProvider, Message,
    PipelineError, PromptRequest,
};
pub use provider::{OpenAiClient, OpenAiConfig, Provider};
