//! CLI entry-point for the batch analysis pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    analysis::{self, Options},
    config::Settings,
    data::{export, loader},
    nlp::{embeddings, sentiment::SentimentScorer},
};

/// Args for the `analyze` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Item store to analyse (parquet or CSV). Defaults to
    /// `<data_dir>/content/items.parquet`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Cap on the lexical vocabulary.
    #[arg(long, default_value_t = 100)]
    pub max_vocabulary: usize,
    /// Number of latent topics.
    #[arg(long, default_value_t = 5)]
    pub topics: usize,
    /// Keywords retained per item.
    #[arg(long, default_value_t = 3)]
    pub keywords: usize,
    /// Number of semantic clusters.
    #[arg(long, default_value_t = 5)]
    pub clusters: usize,
    /// Seed for factorization and clustering.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| settings.join_data("content/items.parquet"));
    let items = loader::load_items(&input)
        .with_context(|| format!("loading item collection from {}", input.display()))?;

    let embedder = embeddings::load_embedder()?;
    let scorer = SentimentScorer::new();

    let opts = Options {
        max_vocabulary: args.max_vocabulary,
        topic_count: args.topics,
        keywords_per_item: args.keywords,
        cluster_count: args.clusters,
        random_seed: args.seed,
    };
    let analysis = analysis::analyze(items, &opts, embedder.as_ref(), &scorer)?;

    for clamp in &analysis.clamps {
        warn!(
            stage = clamp.stage,
            requested = clamp.requested,
            used = clamp.used,
            "parameter adjusted for this batch"
        );
    }
    for (idx, topic) in analysis.topics.iter().enumerate() {
        info!(topic = idx, terms = ?topic.terms, "topic summary");
    }

    export::write_enriched(&analysis, &settings.join_output("enriched.parquet"))?;
    export::write_projection(&analysis, &settings.join_output("projection.csv"))?;
    export::write_topics(&analysis, &settings.join_output("topics.json"))?;
    Ok(())
}
