//! CLI entry-point for summarising an enriched store.

use std::{collections::HashMap, fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use polars::prelude::{ParquetReader, SerReader};
use tracing::instrument;

use crate::config::Settings;

/// Args for the `report` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Enriched store to summarise. Defaults to
    /// `<outputs_dir>/enriched.parquet`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Keywords to list.
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let path = args
        .input
        .unwrap_or_else(|| settings.join_output("enriched.parquet"));
    let file =
        File::open(&path).with_context(|| format!("opening enriched store {}", path.display()))?;
    let df = ParquetReader::new(file).finish()?;

    let labels = df.column("sentiment_label")?.str()?;
    let mut label_counts: HashMap<String, usize> = HashMap::new();
    for label in labels.into_no_null_iter() {
        *label_counts.entry(label.to_string()).or_insert(0) += 1;
    }
    println!("Sentiment distribution");
    for label in ["Positive", "Neutral", "Negative"] {
        let count = label_counts.get(label).copied().unwrap_or(0);
        println!("  {label:<9} {count}");
    }

    let keywords = df.column("top_keywords")?.str()?;
    let mut keyword_counts: HashMap<String, usize> = HashMap::new();
    for joined in keywords.into_no_null_iter() {
        for keyword in joined.split(", ").filter(|k| !k.is_empty()) {
            *keyword_counts.entry(keyword.to_string()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = keyword_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("Top keywords");
    for (keyword, count) in ranked.into_iter().take(args.top) {
        println!("  {keyword:<24} {count}");
    }

    let clusters = df.column("cluster")?.i64()?;
    let mut cluster_counts: HashMap<i64, usize> = HashMap::new();
    for cluster in clusters.into_no_null_iter() {
        *cluster_counts.entry(cluster).or_insert(0) += 1;
    }
    let mut sizes: Vec<(i64, usize)> = cluster_counts.into_iter().collect();
    sizes.sort();
    println!("Cluster sizes");
    for (cluster, count) in sizes {
        println!("  cluster {cluster:<3} {count}");
    }
    Ok(())
}
