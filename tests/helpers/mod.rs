#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use vowlog::embedding::{EmbedFuture, EmbeddingProvider};
use vowlog::journal::Entry;

pub const DIMS: usize = 16;

/// Build an entry from JSON, panicking on malformed test data.
pub fn entry(value: Value) -> Entry {
    serde_json::from_value(value).unwrap()
}

/// An entry carrying a single cost item.
pub fn cost_entry(id: &str, amount: f64, category: &str) -> Entry {
    entry(json!({"id": id, "entities": {"costs": [{"amount": amount, "category": category}]}}))
}

/// An entry carrying `n` explicit tasks with the given status and priority.
pub fn task_entry(id: &str, n: usize, status: &str, priority: &str) -> Entry {
    let tasks: Vec<Value> = (0..n)
        .map(|i| json!({"title": format!("{id} task {i}"), "status": status, "priority": priority}))
        .collect();
    entry(json!({"id": id, "tasks": {"explicit": tasks}}))
}

/// An entry mentioning one vendor.
pub fn vendor_entry(id: &str, name: &str, status: &str) -> Entry {
    entry(json!({"id": id, "entities": {"vendors": [{"name": name, "category": "venue", "status": status}]}}))
}

/// An entry with text, date, emotion, and embedding, for retrieval tests.
pub fn embedded_entry(id: &str, text: &str, emotion: &str, embedding: Vec<f32>) -> Entry {
    entry(json!({
        "id": id,
        "text": text,
        "date": "2026-03-14",
        "sentiment": {"emotion": emotion, "confidence": 0.8},
        "embedding": embedding,
    }))
}

/// Deterministic `DIMS`-dim embedding with a spike at position `seed`.
/// Distinct seeds give orthogonal vectors.
pub fn test_embedding(seed: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; DIMS];
    v[seed % DIMS] = 1.0;
    v
}

/// Mix of two spikes; `weight` of 1.0 equals `test_embedding(a)`.
pub fn blended_embedding(a: usize, b: usize, weight: f32) -> Vec<f32> {
    let mut v = vec![0.0f32; DIMS];
    v[a % DIMS] += weight;
    v[b % DIMS] += 1.0 - weight;
    v
}

/// Embedding provider that returns the same vector for every input.
pub struct FixedProvider {
    vector: Vec<f32>,
}

impl FixedProvider {
    pub fn new(vector: Vec<f32>) -> Arc<dyn EmbeddingProvider> {
        Arc::new(Self { vector })
    }
}

impl EmbeddingProvider for FixedProvider {
    fn embed<'a>(&'a self, _text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(std::future::ready::<anyhow::Result<Vec<f32>>>(Ok(self.vector.clone())))
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }

    fn model(&self) -> &str {
        "fixed"
    }
}

/// Embedding provider whose every call fails, as if the service were down.
pub struct FailingProvider;

impl FailingProvider {
    pub fn new() -> Arc<dyn EmbeddingProvider> {
        Arc::new(Self)
    }
}

impl EmbeddingProvider for FailingProvider {
    fn embed<'a>(&'a self, _text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(std::future::ready::<anyhow::Result<Vec<f32>>>(Err(anyhow::anyhow!(
            "embedding service unavailable"
        ))))
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model(&self) -> &str {
        "failing"
    }
}

/// In-memory sink for formatted log output.
///
/// Install it with [`LogCapture::install`] and keep the guard alive for the
/// calls under test. The subscriber is thread-local, which matches the
/// current-thread runtime `#[tokio::test]` uses.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        (capture, tracing::subscriber::set_default(subscriber))
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
