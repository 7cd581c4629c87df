//! 2-D projection of embeddings for plotting.

use linfa::{
    dataset::DatasetBase,
    prelude::{Fit, Predict},
};
use linfa_reduction::Pca;
use ndarray::Array2;
use tracing::warn;

/// Project the embedding matrix onto its two principal components.
///
/// Visualisation-only output. Degenerate batches (a single item, or
/// all-identical embeddings) collapse to the origin rather than raising.
pub fn project_2d(embeddings: &Array2<f64>) -> Array2<f64> {
    let n = embeddings.nrows();
    if n < 2 || embeddings.ncols() < 2 || total_variance(embeddings) <= f64::EPSILON {
        warn!(rows = n, "degenerate embedding batch; projecting to origin");
        return Array2::zeros((n, 2));
    }

    let dataset = DatasetBase::from(embeddings.clone());
    match Pca::params(2).fit(&dataset) {
        Ok(pca) => pca.predict(embeddings),
        Err(e) => {
            warn!(error = %e, "pca fit failed; projecting to origin");
            Array2::zeros((n, 2))
        }
    }
}

fn total_variance(matrix: &Array2<f64>) -> f64 {
    let n = matrix.nrows() as f64;
    matrix
        .columns()
        .into_iter()
        .map(|col| {
            let mean = col.sum() / n;
            col.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
        })
        .sum()
}
