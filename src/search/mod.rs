//! Fuzzy matching, ranking, and highlight computation.
//!
//! Everything here is a pure function over its inputs; all mutable,
//! time-dependent state lives in [`crate::engine`].

pub(crate) mod highlight;
pub(crate) mod matcher;
pub(crate) mod ranker;

pub use highlight::highlight_spans;
pub use matcher::{MatchOutcome, fuzzy_match};
pub use ranker::rank;
