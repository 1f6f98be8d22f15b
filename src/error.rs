//! Error handling types and utilities.

/// A specialized Result type for typeahead operations.
///
/// This is an alias for `anyhow::Result`, used at the executor and pipeline
/// boundaries. Configuration validation has its own typed error,
/// [`ConfigError`](crate::config::ConfigError).
pub type Result<T> = anyhow::Result<T>;
