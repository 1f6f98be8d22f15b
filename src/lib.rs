//! Embedded fuzzy-search and ranking engine for search-as-you-type widgets.
//!
//! Given a query string and an in-memory collection of [`Record`]s, the
//! engine returns a ranked, highlighted subset of matches fast enough to run
//! on every keystroke. The pipeline debounces input, caches result sets per
//! normalized query (FIFO), and offloads the scan for large datasets to an
//! injected async executor. Rendering is the caller's concern: the engine
//! hands back [`QueryState`] snapshots plus highlight spans and a wrapping
//! keyboard selection.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod executor;
pub mod record;
pub mod search;
pub mod selection;
pub mod tracing;
pub mod types;

pub use config::{ConfigError, SearchConfig};
pub use engine::SearchEngine;
pub use executor::{Executor, InlineExecutor, RankJob, TokioExecutor};
pub use record::Record;
pub use search::{MatchOutcome, fuzzy_match, highlight_spans, rank};
pub use selection::SelectionController;
pub use types::{MatchResult, QueryState};
