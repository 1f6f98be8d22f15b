//! Result and state types shared across the engine.

use serde::Serialize;
use std::sync::Arc;

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Index of the record in the dataset it was ranked against.
    pub record_index: usize,
    /// Normalized score, strictly above the configured threshold.
    pub score: f32,
    /// Name of the field that produced the best score.
    pub field: String,
    /// Character indices of the matched query characters in the normalized
    /// field text, ascending.
    pub positions: Vec<usize>,
}

/// Snapshot of the pipeline state, delivered to listeners on every change.
///
/// `results` is shared with the cache behind an `Arc`, so cloning a snapshot
/// is cheap.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Input text exactly as the caller fed it.
    pub raw_query: String,
    /// Trimmed and case-normalized query; also the cache key.
    pub normalized_query: String,
    /// True while a scan is running (between debounce fire and completion).
    pub is_searching: bool,
    /// Ranked matches, at most `max_results`, sorted by score descending.
    pub results: Arc<Vec<MatchResult>>,
    /// Index into `results` of the keyboard selection, if any.
    pub selected: Option<usize>,
}
