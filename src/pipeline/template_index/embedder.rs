use serde::{Deserialize, Serialize};

use super::IndexError;

/// Produces dense vectors for template and document text.
///
/// The similarity index treats this as a black box; the pipeline ships an
/// Ollama-backed implementation and a deterministic mock for tests.
pub trait EmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, IndexError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Embeddings via the Ollama `/api/embed` endpoint.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaEmbedder {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, IndexError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| IndexError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Local Ollama instance with a 2-minute timeout.
    pub fn default_local(model: &str) -> Result<Self, IndexError> {
        Self::new("http://localhost:11434", model, 120)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, IndexError> {
        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                IndexError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                IndexError::HttpClient(format!(
                    "Embedding request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                IndexError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(IndexError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| IndexError::Embedding(format!("Malformed embed response: {e}")))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(IndexError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }

        Ok(parsed.embeddings)
    }
}

impl EmbeddingModel for OllamaEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        self.request(&[text])?
            .pop()
            .ok_or_else(|| IndexError::Embedding("Empty embedding response".into()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, IndexError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts)
    }
}

/// Request body for Ollama /api/embed
#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

/// Response body from Ollama /api/embed
#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Deterministic embedder for tests — no network, stable vectors.
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self { dimension: 128 }
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingModel for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        Ok(deterministic_vector(text, self.dimension))
    }
}

/// Generate a deterministic unit vector from character trigram counts, so
/// lexically similar texts score closer than dissimilar ones.
fn deterministic_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vec = vec![0.0f32; dim];
    let lower = text.to_lowercase();
    let bytes = lower.as_bytes();

    for window in bytes.windows(3) {
        let mut hash: u32 = 2166136261;
        for &b in window {
            hash ^= b as u32;
            hash = hash.wrapping_mul(16777619);
        }
        vec[(hash as usize) % dim] += 1.0;
    }

    // L2 normalize
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for val in &mut vec {
            *val /= norm;
        }
    }

    vec
}
