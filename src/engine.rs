//! Query pipeline and public engine facade.
//!
//! This is the only component with mutable, time-dependent state: it owns the
//! debounce timer, the result cache, the selection, and the generation
//! counter that discards stale async completions. The matching itself lives
//! in [`crate::search`] as pure functions.

use crate::cache::ResultCache;
use crate::config::{ConfigError, SearchConfig};
use crate::debounce::Debouncer;
use crate::executor::{Executor, RankJob, TokioExecutor};
use crate::record::Record;
use crate::search::rank;
use crate::selection::SelectionController;
use crate::types::{MatchResult, QueryState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

type StateListener = Arc<dyn Fn(&QueryState) + Send + Sync>;
type ErrorListener = Arc<dyn Fn(&anyhow::Error) + Send + Sync>;

/// Pipeline lifecycle: `Idle → Debouncing → (cache hit: Idle) | (Searching → Idle)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Debouncing,
    Searching,
}

/// Everything guarded by the pipeline lock.
struct Pipeline {
    config: SearchConfig,
    records: Arc<Vec<Record>>,
    cache: ResultCache,
    state: QueryState,
    selection: SelectionController,
    debounce: Debouncer,
    phase: Phase,
    /// Bumped on every input, config, or dataset change. A completion whose
    /// generation no longer matches is discarded: last query wins.
    generation: u64,
    disposed: bool,
}

impl Pipeline {
    fn set_phase(&mut self, phase: Phase) {
        if phase != self.phase {
            tracing::trace!(from = ?self.phase, to = ?phase, "pipeline transition");
            self.phase = phase;
        }
    }

    /// Below-gate input: empty the results without touching the cache.
    fn clear_results(&mut self) {
        self.state.results = Arc::new(Vec::new());
        self.state.is_searching = false;
        self.selection.set_count(0);
        self.state.selected = None;
        self.set_phase(Phase::Idle);
    }

    /// Installs a fresh result set; selection never carries over.
    fn apply_results(&mut self, results: Arc<Vec<MatchResult>>) {
        self.selection.set_count(results.len());
        self.state.selected = None;
        self.state.results = results;
        self.state.is_searching = false;
        self.set_phase(Phase::Idle);
    }
}

struct Shared {
    pipeline: Mutex<Pipeline>,
    listeners: Mutex<Vec<StateListener>>,
    error_listeners: Mutex<Vec<ErrorListener>>,
    executor: Arc<dyn Executor>,
    cancel: CancellationToken,
}

/// What `input` decided to do after releasing the pipeline lock.
enum Step {
    Notify,
    Fire(u64),
}

/// What `fire` decided to do after releasing the pipeline lock.
enum Scan {
    CacheHit,
    Sync(Snapshot),
    Offload(Snapshot),
}

/// Immutable capture handed to the ranker; the scan never sees live state.
struct Snapshot {
    records: Arc<Vec<Record>>,
    config: SearchConfig,
    query: String,
}

impl Shared {
    fn notify(&self) {
        let snapshot = {
            let pipeline = self.pipeline.lock();
            if pipeline.disposed {
                return;
            }
            pipeline.state.clone()
        };
        let listeners = self.listeners.lock().clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }

    fn notify_error(&self, error: &anyhow::Error) {
        let listeners = self.error_listeners.lock().clone();
        for listener in &listeners {
            listener(error);
        }
    }

    /// Feeds one input event into the pipeline.
    ///
    /// With `debounced` false the scan fires immediately; dataset
    /// replacement uses this so results ranked against the old dataset
    /// never stay published while a debounce window runs out.
    fn input(self: &Arc<Self>, raw: &str, debounced: bool) {
        let step = {
            let mut pipeline = self.pipeline.lock();
            if pipeline.disposed {
                return;
            }
            pipeline.debounce.cancel();
            pipeline.generation += 1;
            let generation = pipeline.generation;

            let normalized = pipeline.config.normalize(raw.trim());
            pipeline.state.raw_query = raw.to_owned();
            pipeline.state.normalized_query = normalized.clone();

            if normalized.chars().count() < pipeline.config.min_query_length {
                pipeline.clear_results();
                Step::Notify
            } else if !debounced || pipeline.config.debounce.is_zero() {
                Step::Fire(generation)
            } else {
                pipeline.set_phase(Phase::Debouncing);
                let delay = pipeline.config.debounce;
                let shared = Arc::clone(self);
                tracing::trace!(query = %normalized, ?delay, "debounce scheduled");
                pipeline
                    .debounce
                    .schedule(delay, async move { shared.fire(generation) });
                Step::Notify
            }
        };

        match step {
            Step::Notify => self.notify(),
            Step::Fire(generation) => self.fire(generation),
        }
    }

    /// Debounce fired: resolve from the cache or run the scan.
    fn fire(self: &Arc<Self>, generation: u64) {
        let scan = {
            let mut pipeline = self.pipeline.lock();
            if pipeline.disposed || generation != pipeline.generation {
                return;
            }
            let query = pipeline.state.normalized_query.clone();

            if let Some(results) = pipeline.cache.get(&query) {
                tracing::debug!(query = %query, hits = results.len(), "cache hit");
                pipeline.apply_results(results);
                Scan::CacheHit
            } else {
                pipeline.state.is_searching = true;
                pipeline.set_phase(Phase::Searching);
                let snapshot = Snapshot {
                    records: Arc::clone(&pipeline.records),
                    config: pipeline.config.clone(),
                    query,
                };
                if snapshot.records.len() < pipeline.config.large_dataset_threshold {
                    Scan::Sync(snapshot)
                } else {
                    Scan::Offload(snapshot)
                }
            }
        };

        match scan {
            Scan::CacheHit => self.notify(),
            Scan::Sync(snapshot) => {
                self.notify();
                let start = Instant::now();
                let results = rank(&snapshot.records, &snapshot.config, &snapshot.query);
                tracing::debug!(
                    query = %snapshot.query,
                    hits = results.len(),
                    elapsed = ?start.elapsed(),
                    "synchronous scan"
                );
                self.complete(generation, &snapshot.query, results);
            }
            Scan::Offload(snapshot) => {
                self.notify();
                let shared = Arc::clone(self);
                let cancel = self.cancel.clone();
                tokio::spawn(async move {
                    let query = snapshot.query.clone();
                    let job: RankJob = Box::new(move || {
                        rank(&snapshot.records, &snapshot.config, &snapshot.query)
                    });
                    let dispatched = shared.executor.dispatch(job);
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        outcome = dispatched => match outcome {
                            Ok(results) => shared.complete(generation, &query, results),
                            Err(error) => shared.fail(generation, &error),
                        },
                    }
                });
            }
        }
    }

    /// Applies a finished scan unless a newer query superseded it.
    fn complete(&self, generation: u64, query: &str, results: Vec<MatchResult>) {
        {
            let mut pipeline = self.pipeline.lock();
            if pipeline.disposed {
                return;
            }
            if generation != pipeline.generation {
                // Superseded while in flight; not an error, just late.
                tracing::trace!(query = %query, "stale completion discarded");
                return;
            }
            let results = Arc::new(results);
            pipeline.cache.put(query, Arc::clone(&results));
            pipeline.apply_results(results);
        }
        self.notify();
    }

    /// Surfaces a failed scan; the previous results stay on screen.
    fn fail(&self, generation: u64, error: &anyhow::Error) {
        {
            let mut pipeline = self.pipeline.lock();
            if pipeline.disposed || generation != pipeline.generation {
                return;
            }
            tracing::warn!(%error, "background scan failed");
            pipeline.state.is_searching = false;
            pipeline.set_phase(Phase::Idle);
        }
        self.notify_error(error);
        self.notify();
    }
}

/// Embedded fuzzy-search engine for search-as-you-type widgets.
///
/// Feed raw input through [`query`](Self::query); ranked results arrive via
/// the [`on_results_changed`](Self::on_results_changed) listener after the
/// configured debounce. Small datasets are scanned on the calling thread;
/// datasets at or above `large_dataset_threshold` are offloaded to the
/// injected [`Executor`].
///
/// Unless `debounce` is zero and the dataset stays below the offload
/// threshold, the engine must be driven from within a tokio runtime.
///
/// ```
/// use typeahead::{Record, SearchConfig, SearchEngine};
/// use std::time::Duration;
///
/// let engine = SearchEngine::new(SearchConfig {
///     debounce: Duration::ZERO,
///     match_threshold: 0.0,
///     search_fields: vec!["title".into()],
///     ..SearchConfig::default()
/// })?;
/// engine.set_records(vec![
///     Record::new().with_field("title", "Brutal Framework"),
///     Record::new().with_field("title", "Minimal Widget"),
/// ]);
/// engine.query("bru");
/// assert_eq!(engine.state().results.len(), 1);
/// # Ok::<(), typeahead::ConfigError>(())
/// ```
pub struct SearchEngine {
    shared: Arc<Shared>,
}

impl SearchEngine {
    /// Creates an engine with the default tokio-backed executor.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        Self::with_executor(config, Arc::new(TokioExecutor))
    }

    /// Creates an engine with an injected executor for the offload path.
    pub fn with_executor(
        config: SearchConfig,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                pipeline: Mutex::new(Pipeline {
                    config,
                    records: Arc::new(Vec::new()),
                    cache: ResultCache::default(),
                    state: QueryState::default(),
                    selection: SelectionController::new(),
                    debounce: Debouncer::new(),
                    phase: Phase::Idle,
                    generation: 0,
                    disposed: false,
                }),
                listeners: Mutex::new(Vec::new()),
                error_listeners: Mutex::new(Vec::new()),
                executor,
                cancel: CancellationToken::new(),
            }),
        })
    }

    /// Replaces the configuration and clears the cache.
    ///
    /// Fails fast on an invalid config: nothing is applied, the cache is
    /// kept, and the pending debounce keeps running.
    pub fn configure(&self, config: SearchConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut pipeline = self.shared.pipeline.lock();
        if pipeline.disposed {
            return Ok(());
        }
        pipeline.debounce.cancel();
        pipeline.generation += 1;
        pipeline.config = config;
        pipeline.cache.clear();
        Ok(())
    }

    /// Replaces the dataset, clears the cache, and re-evaluates the current
    /// query if one is live.
    ///
    /// The re-evaluation skips the debounce window: the published results
    /// index into the dataset [`records`](Self::records) returns, so they
    /// are replaced (or cleared) before this call returns control.
    pub fn set_records(&self, records: Vec<Record>) {
        let requery = {
            let mut pipeline = self.shared.pipeline.lock();
            if pipeline.disposed {
                return;
            }
            pipeline.debounce.cancel();
            pipeline.generation += 1;
            pipeline.records = Arc::new(records);
            pipeline.cache.clear();
            let raw = pipeline.state.raw_query.clone();
            (!raw.trim().is_empty()).then_some(raw)
        };
        if let Some(raw) = requery {
            self.shared.input(&raw, false);
        }
    }

    /// Feeds raw input text into the pipeline.
    ///
    /// Returns immediately; results are delivered through the listener once
    /// the debounce fires and the scan completes.
    pub fn query(&self, raw: &str) {
        self.shared.input(raw, true);
    }

    /// Registers a listener called with a [`QueryState`] snapshot on every
    /// pipeline change: debounce start, searching start, results ready,
    /// cleared, or selection moved.
    pub fn on_results_changed(&self, listener: impl Fn(&QueryState) + Send + Sync + 'static) {
        self.shared.listeners.lock().push(Arc::new(listener));
    }

    /// Registers a listener for background scan failures.
    ///
    /// A superseded query completing late is not a failure and never reaches
    /// this listener.
    pub fn on_error(&self, listener: impl Fn(&anyhow::Error) + Send + Sync + 'static) {
        self.shared.error_listeners.lock().push(Arc::new(listener));
    }

    /// Moves the keyboard selection over the displayed results, wrapping at
    /// both ends.
    pub fn move_selection(&self, delta: isize) {
        let changed = {
            let mut pipeline = self.shared.pipeline.lock();
            if pipeline.disposed {
                return;
            }
            let before = pipeline.selection.current();
            pipeline.selection.move_by(delta);
            pipeline.state.selected = pipeline.selection.current();
            before != pipeline.selection.current()
        };
        if changed {
            self.shared.notify();
        }
    }

    /// The currently selected match, if any.
    pub fn select_current(&self) -> Option<MatchResult> {
        let pipeline = self.shared.pipeline.lock();
        pipeline
            .selection
            .current()
            .and_then(|index| pipeline.state.results.get(index).cloned())
    }

    /// Snapshot of the current pipeline state.
    pub fn state(&self) -> QueryState {
        self.shared.pipeline.lock().state.clone()
    }

    /// The dataset the engine currently ranks against.
    pub fn records(&self) -> Arc<Vec<Record>> {
        Arc::clone(&self.shared.pipeline.lock().records)
    }

    /// Shuts the pipeline down: cancels the pending debounce and any
    /// in-flight scan. Idempotent, also runs on drop; no listener fires
    /// afterwards.
    pub fn dispose(&self) {
        let mut pipeline = self.shared.pipeline.lock();
        if pipeline.disposed {
            return;
        }
        pipeline.disposed = true;
        pipeline.debounce.cancel();
        pipeline.generation += 1;
        self.shared.cancel.cancel();
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}
