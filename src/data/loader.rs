//! Reads a stored item collection into memory, validating its schema.

use std::{fs::File, path::Path};

use chrono::{DateTime, Timelike, Utc};
use indexmap::IndexSet;
use polars::prelude::{ParquetReader, SerReader};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    data::{Item, Source},
    error::PipelineError,
};

/// Columns every stored collection must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "url", "publishedAt", "source"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    url: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
    source: String,
}

/// Load a collection from a parquet or CSV store, failing fast on a
/// missing column or an empty collection.
pub fn load_items(path: &Path) -> Result<Vec<Item>, PipelineError> {
    let items = match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => load_csv(path)?,
        _ => load_parquet(path)?,
    };
    if items.is_empty() {
        return Err(PipelineError::EmptyCollection);
    }
    let items = dedup_items(items);
    info!(path = %path.display(), rows = items.len(), "loaded item collection");
    Ok(items)
}

fn load_parquet(path: &Path) -> Result<Vec<Item>, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::Storage(e.to_string()))?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| PipelineError::Storage(e.to_string()))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            return Err(PipelineError::MissingColumn(required));
        }
    }

    let column = |name: &str| -> Result<Vec<String>, PipelineError> {
        let series = df
            .column(name)
            .map_err(|e| PipelineError::Storage(e.to_string()))?;
        let values = series
            .str()
            .map_err(|e| PipelineError::Storage(e.to_string()))?;
        Ok(values
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    };

    let titles = column("title")?;
    let urls = column("url")?;
    let stamps = column("publishedAt")?;
    let sources = column("source")?;

    let mut items = Vec::with_capacity(titles.len());
    for idx in 0..titles.len() {
        items.push(Item {
            title: titles[idx].clone(),
            url: urls[idx].clone(),
            published_at: parse_timestamp(&stamps[idx])?,
            source: Source::parse(&sources[idx]),
        });
    }
    Ok(items)
}

fn load_csv(path: &Path) -> Result<Vec<Item>, PipelineError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| PipelineError::Storage(e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| PipelineError::Storage(e.to_string()))?
        .clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(PipelineError::MissingColumn(required));
        }
    }

    let mut items = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result.map_err(|e| PipelineError::Storage(e.to_string()))?;
        items.push(Item {
            title: row.title,
            url: row.url,
            published_at: parse_timestamp(&row.published_at)?,
            source: Source::parse(&row.source),
        });
    }
    Ok(items)
}

/// Parse an ISO-8601 timestamp, truncating sub-second precision.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PipelineError> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim())
        .or_else(|_| DateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%z"))
        .map_err(|_| PipelineError::InvalidTimestamp(raw.to_string()))?;
    let utc = parsed.with_timezone(&Utc);
    Ok(utc.with_nanosecond(0).unwrap_or(utc))
}

/// Uniqueness by (title, url) is an upstream guarantee; re-assert it
/// defensively and keep the first occurrence.
fn dedup_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen = IndexSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert((item.title.clone(), item.url.clone())) {
            unique.push(item);
        } else {
            warn!(title = %item.title, "dropping duplicate item");
        }
    }
    unique
}
