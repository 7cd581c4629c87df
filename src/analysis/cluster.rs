//! Semantic clustering of title embeddings.

use linfa::{
    dataset::DatasetBase,
    prelude::{Fit, Predict},
};
use linfa_clustering::KMeans;
use ndarray::Array2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::{info, warn};

use crate::{error::PipelineError, nlp::embeddings::Embedder};

/// Encode raw titles into a dense embedding matrix, one row per item.
pub fn embed_titles(titles: &[String], embedder: &dyn Embedder) -> Result<Array2<f64>, PipelineError> {
    let vectors = embedder
        .embed(titles)
        .map_err(|e| PipelineError::ModelUnavailable(e.to_string()))?;
    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    let mut matrix = Array2::<f64>::zeros((vectors.len(), dim));
    for (row, vector) in vectors.iter().enumerate() {
        for (col, value) in vector.iter().enumerate() {
            matrix[[row, col]] = f64::from(*value);
        }
    }
    info!(rows = matrix.nrows(), dim, "embedded titles");
    Ok(matrix)
}

/// Partition embeddings into `k` clusters with seeded k-means.
///
/// The caller clamps `k` to the batch size beforehand. Ids carry no
/// ordering semantics; only the partition itself is meaningful. A failed
/// fit degrades to a single cluster instead of raising.
pub fn cluster_embeddings(embeddings: &Array2<f64>, k: usize, seed: u64) -> Vec<usize> {
    let n = embeddings.nrows();
    if n == 0 {
        return Vec::new();
    }
    if k <= 1 || embeddings.ncols() == 0 {
        return vec![0; n];
    }

    let rng = Xoshiro256Plus::seed_from_u64(seed);
    let dataset = DatasetBase::from(embeddings.clone());
    match KMeans::params_with_rng(k, rng)
        .max_n_iterations(300)
        .tolerance(1e-6)
        .fit(&dataset)
    {
        Ok(model) => model.predict(embeddings).to_vec(),
        Err(e) => {
            warn!(error = %e, "k-means fit failed; assigning single cluster");
            vec![0; n]
        }
    }
}
