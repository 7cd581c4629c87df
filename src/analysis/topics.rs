//! Latent topic extraction via non-negative matrix factorization.

use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use serde::Serialize;
use tracing::debug;

use crate::analysis::vectorize::TermMatrix;

/// Terms summarising one latent factor, highest weight first.
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub terms: Vec<String>,
}

pub const TERMS_PER_TOPIC: usize = 5;

const MAX_ITERATIONS: usize = 200;
const EPS: f64 = 1e-9;

/// Factorise the term matrix into `n_topics` non-negative components and
/// summarise each by its top-weighted terms. The caller clamps `n_topics`
/// beforehand; zero topics or an empty vocabulary yield an empty list.
pub fn extract_topics(term_matrix: &TermMatrix, n_topics: usize, seed: u64) -> Vec<Topic> {
    let x = &term_matrix.matrix;
    let (n_docs, n_terms) = x.dim();
    if n_topics == 0 || n_terms == 0 || n_docs == 0 {
        return Vec::new();
    }

    let (_, h) = factorize(x, n_topics, seed);

    let mut topics = Vec::with_capacity(n_topics);
    for row in h.rows() {
        let mut indexed: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        let terms = indexed
            .into_iter()
            .take(TERMS_PER_TOPIC.min(n_terms))
            .map(|(idx, _)| term_matrix.vocabulary[idx].clone())
            .collect();
        topics.push(Topic { terms });
    }
    debug!(topics = topics.len(), "extracted topics");
    topics
}

/// Multiplicative-update NMF: X ≈ W·H with W (docs × k) and H (k × terms)
/// non-negative. Deterministic for a fixed seed.
fn factorize(x: &Array2<f64>, k: usize, seed: u64) -> (Array2<f64>, Array2<f64>) {
    let (n, m) = x.dim();
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let mean = x.mean().unwrap_or(0.0).max(EPS);
    let scale = (mean / k as f64).sqrt();

    let mut w = Array2::from_shape_fn((n, k), |_| rng.gen::<f64>() * scale + EPS);
    let mut h = Array2::from_shape_fn((k, m), |_| rng.gen::<f64>() * scale + EPS);

    for _ in 0..MAX_ITERATIONS {
        // H <- H * (WᵀX) / (WᵀWH)
        let numerator = w.t().dot(x);
        let denominator = w.t().dot(&w).dot(&h) + EPS;
        h = h * numerator / denominator;

        // W <- W * (XHᵀ) / (WHHᵀ)
        let numerator = x.dot(&h.t());
        let denominator = w.dot(&h).dot(&h.t()) + EPS;
        w = w * numerator / denominator;
    }

    (w, h)
}
