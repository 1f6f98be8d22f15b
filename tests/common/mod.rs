//! Shared fixtures and deterministic executors for engine tests.
#![allow(dead_code)]

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use typeahead::{Executor, MatchResult, QueryState, RankJob, Record, SearchConfig, SearchEngine};

/// Builds an engine the way an embedder would, subscriber included.
pub fn engine(config: SearchConfig) -> SearchEngine {
    typeahead::tracing::init();
    SearchEngine::new(config).expect("test config validates")
}

/// Same, with an injected executor for the offload path.
pub fn engine_with(config: SearchConfig, executor: Arc<dyn Executor>) -> SearchEngine {
    typeahead::tracing::init();
    SearchEngine::with_executor(config, executor).expect("test config validates")
}

/// Three titles: two match "bru", one matches "min".
pub fn catalog() -> Vec<Record> {
    vec![
        Record::new().with_field("title", "Brutal Framework"),
        Record::new().with_field("title", "Minimal Widget"),
        Record::new().with_field("title", "Brutalist Buttons"),
    ]
}

/// Zero debounce, zero threshold, title-only: every step is observable.
pub fn instant_config() -> SearchConfig {
    SearchConfig {
        debounce: Duration::ZERO,
        min_query_length: 1,
        match_threshold: 0.0,
        search_fields: vec!["title".into()],
        ..SearchConfig::default()
    }
}

/// Captures every state snapshot the engine publishes.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    states: Arc<Mutex<Vec<QueryState>>>,
}

impl Recorder {
    pub fn listener(&self) -> impl Fn(&QueryState) + Send + Sync + 'static {
        let states = Arc::clone(&self.states);
        move |state| states.lock().push(state.clone())
    }

    pub fn states(&self) -> Vec<QueryState> {
        self.states.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.states.lock().len()
    }

    /// Normalized queries of the snapshots that announced a running scan.
    pub fn searched_queries(&self) -> Vec<String> {
        self.states
            .lock()
            .iter()
            .filter(|state| state.is_searching)
            .map(|state| state.normalized_query.clone())
            .collect()
    }
}

/// Executor whose completions the test releases by hand, oldest first.
#[derive(Debug, Default)]
pub struct GatedExecutor {
    pending: Mutex<Vec<oneshot::Sender<()>>>,
}

impl GatedExecutor {
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Lets the oldest dispatched job finish.
    pub fn release_oldest(&self) {
        let sender = {
            let mut pending = self.pending.lock();
            assert!(!pending.is_empty(), "no dispatched job to release");
            pending.remove(0)
        };
        // A cancelled receiver is fine; the job simply never ran.
        let _ = sender.send(());
    }
}

impl Executor for GatedExecutor {
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, anyhow::Result<Vec<MatchResult>>> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().push(sender);
        Box::pin(async move {
            receiver
                .await
                .map_err(|_| anyhow::anyhow!("gate dropped before release"))?;
            Ok(job())
        })
    }
}

/// Inline executor that counts how many scans were dispatched.
#[derive(Debug, Default)]
pub struct CountingExecutor {
    dispatched: AtomicUsize,
}

impl CountingExecutor {
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }
}

impl Executor for CountingExecutor {
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, anyhow::Result<Vec<MatchResult>>> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(job()) })
    }
}

/// Inline executor that fails while `fail_next` is set.
#[derive(Debug, Default)]
pub struct FlakyExecutor {
    fail_next: AtomicBool,
}

impl FlakyExecutor {
    pub fn set_failing(&self, failing: bool) {
        self.fail_next.store(failing, Ordering::SeqCst);
    }
}

impl Executor for FlakyExecutor {
    fn dispatch(&self, job: RankJob) -> BoxFuture<'static, anyhow::Result<Vec<MatchResult>>> {
        let fail = self.fail_next.load(Ordering::SeqCst);
        Box::pin(async move {
            if fail {
                anyhow::bail!("background scan exploded");
            }
            Ok(job())
        })
    }
}
