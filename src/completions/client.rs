//! Prompt-in, text-out completion client.
//!
//! Wraps any [`LlmProvider`] and never lets an error escape: every call ends
//! in a [`CompletionResult`].

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::core::{CompletionResult, LlmProvider, PromptRequest};

use super::cache::ResponseCache;

pub struct CompletionClient<P: LlmProvider> {
    provider: P,
    cache: Mutex<ResponseCache>,
}

impl<P: LlmProvider> CompletionClient<P> {
    /// Create a client without caching.
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, ResponseCache::disabled())
    }

    pub fn with_cache(provider: P, cache: ResponseCache) -> Self {
        Self {
            provider,
            cache: Mutex::new(cache),
        }
    }

    pub fn with_cache_ttl(provider: P, ttl: Duration) -> Self {
        Self::with_cache(provider, ResponseCache::new(ttl))
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Complete a prompt, answering from the cache when a live entry exists.
    #[tracing::instrument(
        name = "complete",
        skip(self, request),
        fields(model = %self.provider.model(), temperature = request.temperature())
    )]
    pub async fn complete(&self, request: &PromptRequest) -> CompletionResult {
        let cached = self.cache().get(request.text(), request.temperature());
        if let Some(text) = cached {
            tracing::debug!("Answered from response cache");
            return CompletionResult::Success { text };
        }

        self.complete_fresh(request).await
    }

    /// Always call the provider; a success replaces any cached entry.
    pub async fn complete_fresh(&self, request: &PromptRequest) -> CompletionResult {
        match self.provider.generate_text(request).await {
            Ok(text) => {
                self.cache()
                    .insert(request.text(), request.temperature(), text.clone());
                CompletionResult::Success { text }
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    retryable = error.is_retryable(),
                    "Completion failed"
                );
                CompletionResult::Failure { error }
            }
        }
    }

    /// Forget every cached completion.
    pub fn clear_cache(&self) {
        self.cache().clear();
        tracing::info!("Response cache cleared");
    }

    pub fn cached_entries(&self) -> usize {
        let mut cache = self.cache();
        cache.purge_expired();
        cache.len()
    }

    fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        // The cache holds plain data, so a poisoned lock is still usable.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
