//! Injected executor for offloading the ranking scan.

use crate::error::Result;
use crate::types::MatchResult;
use futures::future::BoxFuture;

/// A ranking job: a self-contained closure over an immutable snapshot of
/// records, config, and query.
pub type RankJob = Box<dyn FnOnce() -> Vec<MatchResult> + Send + 'static>;

/// Where the large-dataset scan runs.
///
/// The engine hands an executor a [`RankJob`] and applies the resolved value
/// back on its own turn; implementations only decide where the work happens.
/// Tests substitute deterministic implementations to pin down ordering
/// properties such as stale-result discard.
pub trait Executor: Send + Sync + 'static {
    /// Runs `job` and resolves with its output.
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, Result<Vec<MatchResult>>>;
}

/// Default executor: runs the scan on tokio's blocking thread pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioExecutor;

impl Executor for TokioExecutor {
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, Result<Vec<MatchResult>>> {
        Box::pin(async move {
            tokio::task::spawn_blocking(job)
                .await
                .map_err(|e| anyhow::anyhow!("ranking task failed: {e}"))
        })
    }
}

/// Runs the job inline on the dispatching task.
///
/// Useful for tests and for embedders that want the offload decision without
/// an actual thread hop.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, Result<Vec<MatchResult>>> {
        Box::pin(async move { Ok(job()) })
    }
}
