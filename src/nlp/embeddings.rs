//! Sentence embedding handles.
//!
//! The pipeline receives an embedder as an explicit trait object rather
//! than loading a model at first use; tests swap in the hashed fallback
//! without downloading anything.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

#[cfg(feature = "embeddings")]
use fastembed::TextEmbedding;

use crate::error::PipelineError;

/// A fixed-dimension sentence encoder. Implementations must be
/// deterministic for a given input batch.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn dimension(&self) -> usize;
}

/// Deterministic hashed bag-of-tokens encoder.
///
/// Titles sharing tokens land near each other, which is all the clustering
/// stage needs when the pretrained model is not compiled in.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dim: usize,
}

impl HashedEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(128)
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; self.dim];
                for token in tokenize(text) {
                    let hash = fnv1a(token.as_bytes());
                    let slot = (hash % self.dim as u64) as usize;
                    let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
                    vector[slot] += sign;
                }
                l2_normalize(&mut vector);
                vector
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// MiniLM sentence embeddings via fastembed.
#[cfg(feature = "embeddings")]
pub struct MiniLmEmbedder {
    model: TextEmbedding,
}

#[cfg(feature = "embeddings")]
impl MiniLmEmbedder {
    pub fn try_new() -> Result<Self, PipelineError> {
        let model = TextEmbedding::try_new(Default::default())
            .map_err(|e| PipelineError::ModelUnavailable(e.to_string()))?;
        Ok(Self { model })
    }
}

#[cfg(feature = "embeddings")]
impl Embedder for MiniLmEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let documents: Vec<&str> = texts.iter().map(String::as_str).collect();
        Ok(self.model.embed(documents, None)?)
    }

    fn dimension(&self) -> usize {
        384
    }
}

/// Construct the process-wide embedder handle.
pub fn load_embedder() -> Result<Arc<dyn Embedder>, PipelineError> {
    #[cfg(feature = "embeddings")]
    {
        let embedder = MiniLmEmbedder::try_new()?;
        info!(model = "minilm", "loaded sentence embedder");
        Ok(Arc::new(embedder) as Arc<dyn Embedder>)
    }
    #[cfg(not(feature = "embeddings"))]
    {
        let embedder = HashedEmbedder::default();
        info!(dim = embedder.dimension(), "using hashed embedder");
        Ok(Arc::new(embedder) as Arc<dyn Embedder>)
    }
}
