//! Single-prompt completions with an optional, explicit response cache.

pub mod cache;
pub mod client;

pub use cache::ResponseCache;
pub use client::CompletionClient;
