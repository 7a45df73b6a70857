//! Fan-out/fan-in execution of per-batch price computations on a worker pool.
//!
//! Every batch becomes an independent task that receives its own slice of
//! queries and a shared, read-only reference set. Submission never blocks
//! the caller; the caller then waits for every task and reassembles results
//! by batch position, so completion order never leaks into the output.
//!
//! A run moves through [`RunState`]:
//!
//! ```text
//! Dispatching ──all submitted──▶ Awaiting ──all ok──▶ Complete
//!                                    │
//!                                    └──any failure──▶ Failed
//! ```
//!
//! Dispatched tasks are never cancelled. After a failure the remaining tasks
//! still run to completion, their results are discarded and the first
//! failure is returned.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use kgrid_knn::{KnnConfig, KnnError, QueryPoints, ReferencePoints};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::aggregate::compute_prices;
use crate::batch::{Batch, split_into_batches};
use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Lifecycle of one orchestrated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// Tasks are being submitted.
    Dispatching,
    /// All tasks submitted; `outstanding` results not yet received.
    Awaiting { outstanding: usize },
    /// Every task succeeded and results were concatenated.
    Complete,
    /// A task failed; terminal.
    Failed { batch: usize },
}

/// Collects per-batch results and enforces the run state transitions.
#[derive(Debug)]
struct Collector {
    state: RunState,
    slots: Vec<Option<Vec<f64>>>,
    failure: Option<PipelineError>,
}

impl Collector {
    fn new(n_batches: usize) -> Self {
        Self {
            state: RunState::Dispatching,
            slots: vec![None; n_batches],
            failure: None,
        }
    }

    fn state(&self) -> RunState {
        self.state
    }

    /// Dispatching → Awaiting.
    fn dispatched(&mut self) {
        debug_assert_eq!(self.state, RunState::Dispatching);
        self.state = RunState::Awaiting {
            outstanding: self.slots.len(),
        };
        debug!(n_batches = self.slots.len(), "all batches dispatched");
    }

    /// Records the result of the batch at `position`.
    ///
    /// The first failure moves the run to `Failed`; results arriving after
    /// that are dropped.
    fn record(&mut self, position: usize, result: Result<Vec<f64>, PipelineError>) {
        let outstanding = match self.state {
            RunState::Awaiting { outstanding } => outstanding,
            RunState::Failed { .. } => {
                debug!(position, "discarding result after failure");
                return;
            }
            state => {
                warn!(?state, position, "result received outside awaiting state");
                return;
            }
        };

        match result {
            Ok(prices) => {
                self.slots[position] = Some(prices);
                self.state = RunState::Awaiting {
                    outstanding: outstanding.saturating_sub(1),
                };
            }
            Err(e) => {
                let batch = e.batch().unwrap_or(position);
                debug!(batch, error = %e, "batch failed");
                self.state = RunState::Failed { batch };
                self.failure = Some(e);
            }
        }
    }

    /// Awaiting → Complete, or surfaces the recorded failure.
    fn finish(mut self) -> Result<Vec<f64>, PipelineError> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        if let Some(batch) = self.slots.iter().position(Option::is_none) {
            return Err(PipelineError::MissingResult { batch });
        }

        self.state = RunState::Complete;
        debug!(state = ?self.state, "results collected");
        Ok(self.slots.into_iter().flatten().flatten().collect())
    }
}

/// Runs batched kNN price interpolation on a dedicated rayon thread pool.
///
/// # Example
///
/// ```
/// use kgrid_knn::{QueryPoints, ReferencePoints};
/// use kgrid_pipeline::{Orchestrator, PipelineConfig};
///
/// let reference = ReferencePoints::from_rows(&[
///     [0.0, 0.0, 0.0, 7.0],
///     [1.0, 1.0, 0.0, 2.0],
///     [2.0, 2.0, 0.0, 5.0],
///     [1.0, 1.0, 1.0, 6.0],
/// ])
/// .unwrap();
/// let queries = QueryPoints::from_rows(&[[0.0, 0.0, 1.0], [3.0, 3.0, 3.0]]).unwrap();
///
/// let config = PipelineConfig::new().with_k(2).with_batch_size(1).with_n_workers(2);
/// let orchestrator = Orchestrator::new(&config).unwrap();
/// let prices = orchestrator.interpolate(&queries, &reference).unwrap();
/// assert_eq!(prices, vec![6.5, 5.5]);
/// ```
pub struct Orchestrator {
    pool: ThreadPool,
    config: PipelineConfig,
}

impl Orchestrator {
    /// Validates `config` and builds the worker pool.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`, or
    /// [`PipelineError::WorkerPool`] if the thread pool cannot be built.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.n_workers())
            .thread_name(|i| format!("kgrid-worker-{i}"))
            .build()
            .map_err(|e| PipelineError::WorkerPool {
                reason: e.to_string(),
            })?;
        debug!(n_workers = pool.current_num_threads(), "worker pool ready");
        Ok(Self {
            pool,
            config: config.clone(),
        })
    }

    /// The configuration this orchestrator was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of worker threads in the pool.
    pub fn n_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Estimates a price for every query point.
    ///
    /// `k` is checked against the reference set before anything is
    /// dispatched. The result has one price per query, in query order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Knn`] for an unusable `k`, or the first
    /// task failure of the run.
    #[tracing::instrument(skip_all, fields(n_queries = queries.len(), n_references = reference.len()))]
    pub fn interpolate(
        &self,
        queries: &QueryPoints,
        reference: &ReferencePoints,
    ) -> Result<Vec<f64>, PipelineError> {
        let k = self.config.k();
        KnnConfig::new(k).validate(reference.len())?;

        let batches = split_into_batches(queries, self.config.batch_size())?;
        debug!(
            n_batches = batches.len(),
            batch_size = self.config.batch_size(),
            k,
            "queries batched"
        );

        self.dispatch(&batches, |batch| {
            compute_prices(batch.coords(), reference, k)
        })
    }

    /// Runs `task` once per batch on the pool and concatenates the outputs
    /// in batch order.
    ///
    /// Fails fast: the first task error (or panic) is returned and no partial
    /// output is produced.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::TaskFailed`] or
    /// [`PipelineError::TaskPanicked`] naming the failing batch.
    pub fn dispatch<F>(&self, batches: &[Batch<'_>], task: F) -> Result<Vec<f64>, PipelineError>
    where
        F: Fn(&Batch<'_>) -> Result<Vec<f64>, KnnError> + Sync,
    {
        let mut collector = Collector::new(batches.len());
        let (tx, rx) = mpsc::channel();
        let task = &task;

        self.pool.in_place_scope(|scope| {
            for (position, batch) in batches.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = run_task(batch, task);
                    // the receiver outlives the scope, so send cannot fail
                    let _ = tx.send((position, result));
                });
            }
            drop(tx);
            collector.dispatched();

            for (position, result) in rx.iter() {
                collector.record(position, result);
            }
        });

        debug_assert!(matches!(
            collector.state(),
            RunState::Awaiting { outstanding: 0 } | RunState::Failed { .. }
        ));
        collector.finish()
    }
}

/// Runs the whole query set through the price aggregator as a single unit.
///
/// # Errors
///
/// Returns [`PipelineError::Knn`] if `k` is unusable for `reference`.
pub fn interpolate_unbatched(
    queries: &QueryPoints,
    reference: &ReferencePoints,
    k: usize,
) -> Result<Vec<f64>, PipelineError> {
    Ok(compute_prices(queries.coords(), reference, k)?)
}

fn run_task<F>(batch: &Batch<'_>, task: &F) -> Result<Vec<f64>, PipelineError>
where
    F: Fn(&Batch<'_>) -> Result<Vec<f64>, KnnError>,
{
    debug!(batch = batch.index(), n_queries = batch.len(), "batch started");
    match panic::catch_unwind(AssertUnwindSafe(|| task(batch))) {
        Ok(Ok(prices)) => Ok(prices),
        Ok(Err(source)) => Err(PipelineError::TaskFailed {
            batch: batch.index(),
            source,
        }),
        Err(payload) => Err(PipelineError::TaskPanicked {
            batch: batch.index(),
            reason: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
