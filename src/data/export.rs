//! Persists enriched collections and their side outputs.

use std::{fs::File, path::Path};

use anyhow::Result;
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, ParquetWriter, SerWriter, Series};
use tracing::info;

use crate::analysis::Analysis;

/// Write the enriched collection as parquet, with derived columns appended
/// after the stored ones.
pub fn write_enriched(analysis: &Analysis, path: &Path) -> Result<()> {
    let items = &analysis.items;
    let titles: Vec<String> = items.iter().map(|r| r.item.title.clone()).collect();
    let urls: Vec<String> = items.iter().map(|r| r.item.url.clone()).collect();
    let stamps: Vec<String> = items
        .iter()
        .map(|r| r.item.published_at.to_rfc3339())
        .collect();
    let sources: Vec<String> = items
        .iter()
        .map(|r| r.item.source.as_str().to_string())
        .collect();
    let clean: Vec<String> = items.iter().map(|r| r.clean_title.clone()).collect();
    let keywords: Vec<String> = items.iter().map(|r| r.top_keywords.join(", ")).collect();
    let scores: Vec<f64> = items.iter().map(|r| r.sentiment_score).collect();
    let labels: Vec<String> = items
        .iter()
        .map(|r| r.sentiment_label.as_str().to_string())
        .collect();
    let clusters: Vec<i64> = items.iter().map(|r| r.cluster as i64).collect();

    let mut df = DataFrame::new(vec![
        Series::new("title".into(), titles),
        Series::new("url".into(), urls),
        Series::new("publishedAt".into(), stamps),
        Series::new("source".into(), sources),
        Series::new("clean_title".into(), clean),
        Series::new("top_keywords".into(), keywords),
        Series::new("sentiment_score".into(), scores),
        Series::new("sentiment_label".into(), labels),
        Series::new("cluster".into(), clusters),
    ])?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(&mut df)?;
    info!(path = %path.display(), rows = df.height(), "wrote enriched collection");
    Ok(())
}

/// Write the 2-D projection, row-aligned with the collection, as CSV.
pub fn write_projection(analysis: &Analysis, path: &Path) -> Result<()> {
    let xs: Vec<f64> = analysis.projection.column(0).to_vec();
    let ys: Vec<f64> = analysis.projection.column(1).to_vec();
    let mut df = DataFrame::new(vec![
        Series::new("x".into(), xs),
        Series::new("y".into(), ys),
    ])?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    info!(path = %path.display(), rows = df.height(), "wrote projection");
    Ok(())
}

/// Write the batch-level topic summaries as JSON.
pub fn write_topics(analysis: &Analysis, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &analysis.topics)?;
    info!(path = %path.display(), topics = analysis.topics.len(), "wrote topics");
    Ok(())
}
