//! Client for OpenAI-compatible `/embeddings` endpoints.
//!
//! Works against the hosted OpenAI API and against local servers that speak
//! the same protocol. The API key is read from the environment variable named
//! in [`EmbeddingConfig::api_key_env`] at construction; when it is unset the
//! request is sent without authentication.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{EmbedFuture, EmbeddingProvider};
use crate::config::EmbeddingConfig;

/// Failures talking to the embedding service.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("embedding service returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("embedding service returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Remote embedding provider.
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    url: String,
    model: String,
    dimensions: usize,
    api_key: Option<String>,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                var = %config.api_key_env,
                "embedding API key not set, requests will be unauthenticated"
            );
        }

        Ok(Self {
            client,
            url: embeddings_url(&config.endpoint),
            model: config.model.clone(),
            dimensions: config.dimensions,
            api_key,
        })
    }

    async fn request(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        tracing::debug!(url = %self.url, inputs = texts.len(), "requesting embeddings");

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };
        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Status { status, body });
        }

        let mut parsed: EmbeddingResponse = response.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                got: parsed.data.len(),
            });
        }
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move {
            if text.trim().is_empty() {
                tracing::warn!("empty text provided for embedding");
                return Ok(vec![0.0; self.dimensions]);
            }
            let mut vectors = self.request(&[text]).await?;
            let vector = vectors.pop().ok_or(EmbeddingError::CountMismatch {
                expected: 1,
                got: 0,
            })?;
            tracing::debug!(dimensions = vector.len(), "embedding generated");
            Ok::<_, anyhow::Error>(vector)
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Join the configured endpoint with `/embeddings`, tolerating a trailing slash.
fn embeddings_url(endpoint: &str) -> String {
    format!("{}/embeddings", endpoint.trim_end_matches('/'))
}
