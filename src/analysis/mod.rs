//! Batch analysis pipeline over a loaded item collection.
//!
//! Stages run strictly in order, each appending derived attributes:
//! normalise → vectorize → topics → keywords → sentiment → cluster →
//! project. Item-level anomalies degrade to empty derived values; only
//! schema and model-loading failures abort a run.

pub mod cluster;
pub mod keywords;
pub mod project;
pub mod topics;
pub mod vectorize;

use ndarray::Array2;
use tracing::{info, warn};

use crate::{
    data::Item,
    error::PipelineError,
    nlp::{
        embeddings::Embedder,
        normalize,
        sentiment::{SentimentLabel, SentimentScorer},
    },
};

pub use topics::Topic;

/// Per-call analysis options, all overridable.
#[derive(Debug, Clone)]
pub struct Options {
    /// Cap on the lexical vocabulary.
    pub max_vocabulary: usize,
    /// Latent topics requested.
    pub topic_count: usize,
    /// Keywords retained per item.
    pub keywords_per_item: usize,
    /// Semantic clusters requested.
    pub cluster_count: usize,
    /// Seed for factorization and clustering.
    pub random_seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_vocabulary: 100,
            topic_count: 5,
            keywords_per_item: 3,
            cluster_count: 5,
            random_seed: 42,
        }
    }
}

/// A parameter the pipeline adjusted to fit a degenerate batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clamp {
    pub stage: &'static str,
    pub requested: usize,
    pub used: usize,
}

/// An item with every derived attribute attached. Constructing this type
/// only at the end of the run guarantees no partial rows.
#[derive(Debug, Clone)]
pub struct AnalyzedItem {
    pub item: Item,
    pub clean_title: String,
    pub top_keywords: Vec<String>,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub cluster: usize,
}

/// Full pipeline output: the enriched collection plus batch-level side
/// outputs and any clamps applied along the way.
#[derive(Debug)]
pub struct Analysis {
    pub items: Vec<AnalyzedItem>,
    pub topics: Vec<Topic>,
    /// Row-aligned 2-D projection of the title embeddings.
    pub projection: Array2<f64>,
    pub clamps: Vec<Clamp>,
}

/// Run the full analysis over one batch.
pub fn analyze(
    items: Vec<Item>,
    opts: &Options,
    embedder: &dyn Embedder,
    scorer: &SentimentScorer,
) -> Result<Analysis, PipelineError> {
    if items.is_empty() {
        return Err(PipelineError::EmptyCollection);
    }
    let n = items.len();
    let mut clamps = Vec::new();

    let clean_titles: Vec<String> = items
        .iter()
        .map(|item| normalize::clean_text(&item.title))
        .collect();

    let term_matrix = vectorize::fit_transform(&clean_titles, opts.max_vocabulary);
    if term_matrix.is_empty() {
        clamps.push(Clamp {
            stage: "vectorize",
            requested: opts.max_vocabulary,
            used: 0,
        });
    }

    let topic_count = clamp(
        "topics",
        opts.topic_count,
        opts.topic_count.min(term_matrix.vocabulary.len()).min(n),
        &mut clamps,
    );
    let topics = topics::extract_topics(&term_matrix, topic_count, opts.random_seed);

    let keyword_lists = keywords::assign_keywords(&term_matrix, opts.keywords_per_item);

    let sentiments: Vec<(f64, SentimentLabel)> = items
        .iter()
        .map(|item| scorer.score_with_label(&item.title))
        .collect();

    let raw_titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();
    let embeddings = cluster::embed_titles(&raw_titles, embedder)?;
    let cluster_count = clamp(
        "cluster",
        opts.cluster_count,
        opts.cluster_count.min(n),
        &mut clamps,
    );
    let assignments = cluster::cluster_embeddings(&embeddings, cluster_count, opts.random_seed);

    let projection = project::project_2d(&embeddings);

    let analyzed = items
        .into_iter()
        .zip(clean_titles)
        .zip(keyword_lists)
        .zip(sentiments)
        .zip(assignments)
        .map(
            |((((item, clean_title), top_keywords), (score, label)), cluster)| AnalyzedItem {
                item,
                clean_title,
                top_keywords,
                sentiment_score: score,
                sentiment_label: label,
                cluster,
            },
        )
        .collect();

    info!(
        items = n,
        topics = topics.len(),
        clusters = cluster_count,
        clamps = clamps.len(),
        "analysis complete"
    );
    Ok(Analysis {
        items: analyzed,
        topics,
        projection,
        clamps,
    })
}

fn clamp(stage: &'static str, requested: usize, used: usize, clamps: &mut Vec<Clamp>) -> usize {
    if used < requested {
        warn!(stage, requested, used, "clamping for degenerate batch");
        clamps.push(Clamp {
            stage,
            requested,
            used,
        });
    }
    used
}
