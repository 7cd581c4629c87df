use std::io::Write;

use chrono::{TimeZone, Utc};
use trendscope::{
    analysis::{analyze, Options},
    data::{loader::load_items, Item, Source},
    error::PipelineError,
    nlp::{embeddings::HashedEmbedder, sentiment::SentimentLabel, sentiment::SentimentScorer},
};

fn item(title: &str, url: &str) -> Item {
    Item {
        title: title.to_string(),
        url: url.to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        source: Source::Rss,
    }
}

#[test]
fn every_item_gets_every_derived_attribute() {
    let items = vec![
        item("AI transforms marketing teams", "https://a.example/1"),
        item("Local bakery wins award", "https://a.example/2"),
        item("AI transforms marketing strategy", "https://a.example/3"),
    ];
    let opts = Options {
        cluster_count: 2,
        keywords_per_item: 5,
        ..Options::default()
    };
    let embedder = HashedEmbedder::default();
    let scorer = SentimentScorer::new();
    let analysis = analyze(items, &opts, &embedder, &scorer).expect("pipeline runs");

    assert_eq!(analysis.items.len(), 3);
    assert_eq!(analysis.projection.dim(), (3, 2));
    for row in &analysis.items {
        assert!(!row.clean_title.is_empty());
        assert!(!row.top_keywords.is_empty());
        assert!(row.sentiment_score >= -1.0 && row.sentiment_score <= 1.0);
        assert!(row.cluster < 2);
    }

    // The near-duplicate AI titles pair up; the bakery title stands alone.
    assert_eq!(analysis.items[0].cluster, analysis.items[2].cluster);
    assert_ne!(analysis.items[0].cluster, analysis.items[1].cluster);

    // Both AI titles surface the shared subject terms.
    for idx in [0, 2] {
        let keywords = &analysis.items[idx].top_keywords;
        assert!(keywords.iter().any(|k| k == "ai" || k.starts_with("ai ")));
        assert!(keywords.iter().any(|k| k.contains("marketing")));
    }

    // No polarity language anywhere in this batch.
    for row in &analysis.items {
        assert_eq!(row.sentiment_label, SentimentLabel::Neutral);
    }
}

#[test]
fn repeated_runs_are_identical_for_a_fixed_seed() {
    let batch = || {
        vec![
            item("AI transforms marketing teams", "https://a.example/1"),
            item("Local bakery wins award", "https://a.example/2"),
            item("Markets rally on earnings", "https://a.example/3"),
            item("Rust compiler speeds up builds", "https://a.example/4"),
        ]
    };
    let opts = Options {
        cluster_count: 2,
        ..Options::default()
    };
    let embedder = HashedEmbedder::default();
    let scorer = SentimentScorer::new();

    let first = analyze(batch(), &opts, &embedder, &scorer).expect("pipeline runs");
    let second = analyze(batch(), &opts, &embedder, &scorer).expect("pipeline runs");

    let keywords = |a: &trendscope::analysis::Analysis| -> Vec<Vec<String>> {
        a.items.iter().map(|r| r.top_keywords.clone()).collect()
    };
    let clusters = |a: &trendscope::analysis::Analysis| -> Vec<usize> {
        a.items.iter().map(|r| r.cluster).collect()
    };
    assert_eq!(keywords(&first), keywords(&second));
    assert_eq!(clusters(&first), clusters(&second));
}

#[test]
fn single_item_batch_clamps_instead_of_failing() {
    let items = vec![item("AI transforms marketing teams", "https://a.example/1")];
    let opts = Options::default(); // requests 5 clusters and 5 topics
    let embedder = HashedEmbedder::default();
    let scorer = SentimentScorer::new();
    let analysis = analyze(items, &opts, &embedder, &scorer).expect("pipeline runs");

    assert_eq!(analysis.items.len(), 1);
    assert_eq!(analysis.items[0].cluster, 0);
    assert!(analysis
        .clamps
        .iter()
        .any(|c| c.stage == "cluster" && c.requested == 5 && c.used == 1));
    // A single item also caps the factorisation: no more topics than items.
    assert!(analysis
        .clamps
        .iter()
        .any(|c| c.stage == "topics" && c.requested == 5 && c.used == 1));
    assert_eq!(analysis.topics.len(), 1);
    assert!(analysis.projection.iter().all(|v| *v == 0.0));
}

#[test]
fn small_vocabulary_clamps_the_topic_count() {
    let items = vec![
        item("AI transforms marketing teams", "https://a.example/1"),
        item("Local bakery expands downtown", "https://a.example/2"),
        item("Markets rally on earnings", "https://a.example/3"),
    ];
    let opts = Options {
        max_vocabulary: 2,
        ..Options::default() // requests 5 topics
    };
    let embedder = HashedEmbedder::default();
    let scorer = SentimentScorer::new();
    let analysis = analyze(items, &opts, &embedder, &scorer).expect("pipeline runs");

    assert!(analysis
        .clamps
        .iter()
        .any(|c| c.stage == "topics" && c.requested == 5 && c.used == 2));
    assert_eq!(analysis.topics.len(), 2);
}

#[test]
fn empty_collection_is_rejected() {
    let opts = Options::default();
    let embedder = HashedEmbedder::default();
    let scorer = SentimentScorer::new();
    let err = analyze(Vec::new(), &opts, &embedder, &scorer).expect_err("must fail");
    assert!(matches!(err, PipelineError::EmptyCollection));
}

#[test]
fn collection_missing_a_column_is_rejected_before_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.csv");
    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(file, "title,url,publishedAt").expect("write header");
    writeln!(file, "Some title,https://a.example/1,2025-06-01T12:00:00Z").expect("write row");
    drop(file);

    let err = load_items(&path).expect_err("schema must be rejected");
    assert!(matches!(err, PipelineError::MissingColumn("source")));
}

#[test]
fn loader_parses_sources_and_truncates_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.csv");
    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(file, "title,url,publishedAt,source").expect("header");
    writeln!(
        file,
        "Rust 2.0 announced,https://a.example/1,2025-06-01T12:00:00.789Z,Hacker News"
    )
    .expect("row");
    writeln!(
        file,
        "Rust 2.0 announced,https://a.example/1,2025-06-01T12:00:00Z,Hacker News"
    )
    .expect("duplicate row");
    drop(file);

    let items = load_items(&path).expect("loads");
    assert_eq!(items.len(), 1, "duplicate (title, url) pairs are dropped");
    assert_eq!(items[0].source, Source::HackerNews);
    assert_eq!(items[0].published_at.timestamp_subsec_millis(), 0);
}
