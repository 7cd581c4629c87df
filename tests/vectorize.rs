use trendscope::analysis::{keywords::assign_keywords, vectorize::fit_transform};

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn vocabulary_includes_unigrams_and_bigrams() {
    let tm = fit_transform(&docs(&["ai transforms marketing", "ai wins"]), 100);
    assert!(tm.vocabulary.iter().any(|t| t == "ai"));
    assert!(tm.vocabulary.iter().any(|t| t == "ai transforms"));
    assert_eq!(tm.matrix.nrows(), 2);
    assert_eq!(tm.matrix.ncols(), tm.vocabulary.len());
}

#[test]
fn vocabulary_respects_the_cap() {
    let tm = fit_transform(
        &docs(&["alpha beta gamma delta", "epsilon zeta eta theta"]),
        3,
    );
    assert_eq!(tm.vocabulary.len(), 3);
    assert_eq!(tm.matrix.ncols(), 3);
}

#[test]
fn rows_are_l2_normalised() {
    let tm = fit_transform(&docs(&["ai marketing", "bakery award"]), 100);
    for row in tm.matrix.rows() {
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}

#[test]
fn rare_terms_outweigh_common_ones() {
    let tm = fit_transform(
        &docs(&["ai teams", "ai bakery", "ai strategy"]),
        100,
    );
    let col = |term: &str| tm.vocabulary.iter().position(|t| t == term).unwrap();
    // "ai" appears in every document; "teams" only in the first.
    assert!(tm.matrix[[0, col("teams")]] > tm.matrix[[0, col("ai")]]);
}

#[test]
fn empty_batch_degrades_to_zero_columns() {
    let tm = fit_transform(&docs(&["", "", ""]), 100);
    assert!(tm.is_empty());
    assert_eq!(tm.matrix.dim(), (3, 0));
    let keywords = assign_keywords(&tm, 3);
    assert!(keywords.iter().all(Vec::is_empty));
}

#[test]
fn single_document_batch_does_not_crash() {
    let tm = fit_transform(&docs(&["ai transforms marketing"]), 100);
    assert_eq!(tm.matrix.nrows(), 1);
    assert!(!tm.is_empty());
}

#[test]
fn zero_rows_yield_empty_keyword_lists() {
    let tm = fit_transform(&docs(&["ai transforms marketing", ""]), 100);
    let keywords = assign_keywords(&tm, 3);
    assert!(!keywords[0].is_empty());
    assert!(keywords[1].is_empty());
}

#[test]
fn keyword_assignment_is_deterministic() {
    let batch = docs(&[
        "ai transforms marketing teams",
        "local bakery expands downtown",
        "ai transforms marketing strategy",
    ]);
    let first = assign_keywords(&fit_transform(&batch, 100), 3);
    let second = assign_keywords(&fit_transform(&batch, 100), 3);
    assert_eq!(first, second);
}

#[test]
fn keyword_ties_break_by_vocabulary_index() {
    // Both terms carry identical weight; the alphabetically earlier column wins.
    let tm = fit_transform(&docs(&["zebra apple"]), 2);
    let keywords = assign_keywords(&tm, 1);
    assert_eq!(keywords[0], vec!["apple".to_string()]);
}
