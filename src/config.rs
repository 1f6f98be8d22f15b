//! Search configuration and validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Error returned when a [`SearchConfig`] fails validation.
///
/// `SearchEngine::configure` rejects the whole config on the first invalid
/// field; nothing partial is ever applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_results must be greater than zero")]
    ZeroMaxResults,
    #[error("match_threshold must be within [0, 1), got {0}")]
    ThresholdOutOfRange(f32),
}

/// Tunables for the matching pipeline.
///
/// Immutable once applied to an engine; replacing it clears the result cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Queries shorter than this (after normalization) clear the results
    /// instead of searching.
    pub min_query_length: usize,
    /// Upper bound on the number of results returned per query.
    pub max_results: usize,
    /// How long input must stay unchanged before a search fires. Zero fires
    /// inline.
    pub debounce: Duration,
    /// Scores must be strictly above this to survive ranking. Valid range is
    /// `[0, 1)`.
    pub match_threshold: f32,
    /// When false, query and candidate text are lowercased before matching.
    pub case_sensitive: bool,
    /// Record fields scanned per query, in priority order: the first field to
    /// reach the best score wins ties.
    pub search_fields: Vec<String>,
    /// Datasets with at least this many records are scanned on the executor
    /// instead of the caller's thread.
    pub large_dataset_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: 1,
            max_results: 10,
            debounce: Duration::from_millis(150),
            match_threshold: 0.6,
            case_sensitive: false,
            search_fields: vec!["title".into(), "content".into(), "tags".into()],
            large_dataset_threshold: 1000,
        }
    }
}

impl SearchConfig {
    /// Checks every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        if !(0.0..1.0).contains(&self.match_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.match_threshold));
        }
        Ok(())
    }

    /// Case normalization, applied identically to queries and candidate text.
    pub(crate) fn normalize(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_owned()
        } else {
            text.to_lowercase()
        }
    }
}
