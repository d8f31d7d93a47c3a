//! Embedding backend for the skill matcher.
//!
//! The embedding model itself stays an external service: `HttpEmbedder`
//! talks to an OpenAI-compatible `/embeddings` endpoint. Everything that
//! needs vectors goes through the `SkillEmbedder` trait so tests (and any
//! future backend) can swap in a deterministic implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embeddings API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embeddings API returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// Embeds free-text skill strings into fixed-dimension vectors.
///
/// Carried in `AppState` as `Arc<dyn SkillEmbedder>`.
#[async_trait]
pub trait SkillEmbedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI-compatible embeddings client.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl SkillEmbedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let request = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingsResponse = response.json().await?;
        if body.data.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                got: body.data.len(),
            });
        }

        debug!(
            "Embedded {} texts with model {}",
            texts.len(),
            self.model
        );

        // The API reports an index per entry; order by it rather than
        // trusting response order.
        let mut entries = body.data;
        entries.sort_by_key(|e| e.index);
        Ok(entries.into_iter().map(|e| e.embedding).collect())
    }
}

/// Cosine similarity between two vectors; 0.0 when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
