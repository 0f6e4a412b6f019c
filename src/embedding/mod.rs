//! Embedding collaborator interface.
//!
//! The analysis core never computes vectors itself. It consumes them through
//! the [`EmbeddingProvider`] trait, which is injected into the retriever at
//! construction. The provider is created via [`create_provider`] from
//! configuration.

pub mod openai;

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

use crate::config::EmbeddingConfig;

/// Boxed future returned by [`EmbeddingProvider`] methods.
pub type EmbedFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Trait for turning text into vectors.
///
/// Object-safe so it can be shared as `Arc<dyn EmbeddingProvider>`. All vectors
/// a provider returns are expected to share one dimensionality.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>>;

    /// Number of dimensions this provider produces.
    fn dimensions(&self) -> usize;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Provider used when embeddings are switched off. Every call fails.
pub struct DisabledProvider;

impl EmbeddingProvider for DisabledProvider {
    fn embed<'a>(&'a self, _text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(std::future::ready::<Result<Vec<f32>>>(Err(anyhow::anyhow!(
            "embeddings are disabled (embedding.provider = \"none\")"
        ))))
    }

    fn dimensions(&self) -> usize {
        0
    }

    fn model(&self) -> &str {
        "none"
    }
}

/// Create an embedding provider from config.
///
/// Supported providers: `"openai"` (any OpenAI-compatible `/embeddings`
/// endpoint) and `"none"`.
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "openai" => {
            let provider = openai::OpenAiEmbeddingProvider::new(config)?;
            Ok(Box::new(provider))
        }
        "none" => Ok(Box::new(DisabledProvider)),
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: openai, none"),
    }
}
