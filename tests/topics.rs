use trendscope::analysis::{
    topics::{extract_topics, TERMS_PER_TOPIC},
    vectorize::fit_transform,
};

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn topics_summarise_the_batch() {
    let tm = fit_transform(
        &docs(&[
            "ai transforms marketing teams",
            "ai transforms marketing strategy",
            "local bakery expands downtown",
            "bakery opens second downtown shop",
        ]),
        100,
    );
    let topics = extract_topics(&tm, 2, 42);
    assert_eq!(topics.len(), 2);
    for topic in &topics {
        assert!(topic.terms.len() <= TERMS_PER_TOPIC);
        assert!(!topic.terms.is_empty());
        for term in &topic.terms {
            assert!(tm.vocabulary.contains(term));
        }
    }
}

#[test]
fn extraction_is_deterministic_for_a_fixed_seed() {
    let tm = fit_transform(
        &docs(&[
            "ai transforms marketing",
            "bakery wins downtown praise",
            "markets rally on ai news",
        ]),
        100,
    );
    let first: Vec<Vec<String>> = extract_topics(&tm, 3, 42)
        .into_iter()
        .map(|t| t.terms)
        .collect();
    let second: Vec<Vec<String>> = extract_topics(&tm, 3, 42)
        .into_iter()
        .map(|t| t.terms)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn empty_vocabulary_yields_no_topics() {
    let tm = fit_transform(&docs(&["", ""]), 100);
    let topics = extract_topics(&tm, 5, 42);
    assert!(topics.is_empty());
}

#[test]
fn zero_requested_topics_yield_no_topics() {
    let tm = fit_transform(&docs(&["ai transforms marketing"]), 100);
    assert!(extract_topics(&tm, 0, 42).is_empty());
}
