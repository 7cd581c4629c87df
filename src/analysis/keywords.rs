//! Per-item keyword selection from the fitted term matrix.

use crate::analysis::vectorize::TermMatrix;

/// Pick each item's `top_n` highest-weighted terms from its own row,
/// highest weight first, ties broken by vocabulary index. All-zero rows
/// (empty cleaned text, or every term outside the capped vocabulary)
/// yield an empty list.
pub fn assign_keywords(term_matrix: &TermMatrix, top_n: usize) -> Vec<Vec<String>> {
    term_matrix
        .matrix
        .rows()
        .into_iter()
        .map(|row| {
            let mut weighted: Vec<(usize, f64)> = row
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, weight)| *weight > 0.0)
                .collect();
            weighted.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });
            weighted
                .into_iter()
                .take(top_n)
                .map(|(idx, _)| term_matrix.vocabulary[idx].clone())
                .collect()
        })
        .collect()
}
