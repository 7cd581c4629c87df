//! Content trend and sentiment analysis pipeline.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
