//! TF-IDF vectorization over unigrams and bigrams.

use std::collections::HashMap;

use ndarray::Array2;
use tracing::{debug, warn};

/// Fitted vocabulary paired with its per-item weight matrix. The two are
/// never separated: keyword assignment and topic extraction both need the
/// term-to-column mapping.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    /// Items × vocabulary weights, L2-normalised per row.
    pub matrix: Array2<f64>,
    /// Column index → term, sorted alphabetically.
    pub vocabulary: Vec<String>,
}

impl TermMatrix {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Fit a capped vocabulary over the whole batch and weight each item.
///
/// Weights are raw term count × smoothed idf (`ln((1+n)/(1+df)) + 1`),
/// rows L2-normalised. A batch whose vocabulary collapses to nothing
/// yields a zero-column matrix rather than failing.
pub fn fit_transform(docs: &[String], max_features: usize) -> TermMatrix {
    let docs_terms: Vec<Vec<String>> = docs.iter().map(|doc| extract_terms(doc)).collect();

    let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
    let mut document_freq: HashMap<&str, usize> = HashMap::new();
    for terms in &docs_terms {
        let mut seen: HashMap<&str, ()> = HashMap::new();
        for term in terms {
            *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
            seen.entry(term.as_str()).or_insert(());
        }
        for term in seen.keys() {
            *document_freq.entry(term).or_insert(0) += 1;
        }
    }

    if corpus_counts.is_empty() {
        warn!("vocabulary collapsed to zero terms");
        return TermMatrix {
            matrix: Array2::zeros((docs.len(), 0)),
            vocabulary: Vec::new(),
        };
    }

    // Keep the most frequent terms corpus-wide, then index alphabetically
    // so column order is deterministic.
    let mut ranked: Vec<(&str, usize)> = corpus_counts.iter().map(|(t, c)| (*t, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked.truncate(max_features);
    let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| (*t).to_string()).collect();
    vocabulary.sort();

    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.as_str(), idx))
        .collect();

    let n_docs = docs.len();
    let n_terms = vocabulary.len();
    let mut matrix = Array2::<f64>::zeros((n_docs, n_terms));
    for (row, terms) in docs_terms.iter().enumerate() {
        for term in terms {
            if let Some(&col) = index.get(term.as_str()) {
                matrix[[row, col]] += 1.0;
            }
        }
    }

    // Smoothed idf, then per-row L2 normalisation.
    for (term, &col) in &index {
        let df = document_freq.get(term).copied().unwrap_or(0);
        let idf = (((1 + n_docs) as f64) / ((1 + df) as f64)).ln() + 1.0;
        for row in 0..n_docs {
            matrix[[row, col]] *= idf;
        }
    }
    for mut row in matrix.rows_mut() {
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    debug!(docs = n_docs, terms = n_terms, "fitted term matrix");
    TermMatrix { matrix, vocabulary }
}

/// Unigrams plus adjacent bigrams of a cleaned document.
fn extract_terms(doc: &str) -> Vec<String> {
    let tokens: Vec<&str> = doc.split_whitespace().collect();
    let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    for window in tokens.windows(2) {
        terms.push(window.join(" "));
    }
    terms
}
