//! Text preparation and pretrained-model handles.

pub mod embeddings;
pub mod normalize;
pub mod sentiment;
