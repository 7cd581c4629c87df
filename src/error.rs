//! Typed failure modes for the analysis pipeline.

use thiserror::Error;

/// Fatal pipeline failures. Degenerate batches (vocabulary collapse,
/// fewer items than requested clusters) are not errors; they clamp and
/// surface as warnings in the analysis report instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The stored collection is missing a required column.
    #[error("input collection missing required column `{0}`")]
    MissingColumn(&'static str),

    /// The stored collection contains no rows.
    #[error("input collection is empty")]
    EmptyCollection,

    /// A `publishedAt` value could not be parsed as a timezone-aware timestamp.
    #[error("could not parse publishedAt value `{0}`")]
    InvalidTimestamp(String),

    /// A pretrained model handle failed to initialise.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Underlying storage failure while reading the collection.
    #[error("storage error: {0}")]
    Storage(String),
}
