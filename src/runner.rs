use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::equity::TrialTally;
use crate::error::EquityError;

/// A slice of the total trial count, simulated from its own seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialBatch {
    pub trials: u32,
    pub seed: u64,
}

/// Splits `trials` into batches of at most `batch_size`, each seeded from `rng`.
pub fn plan_batches<R: Rng + ?Sized>(trials: u32, batch_size: u32, rng: &mut R) -> Vec<TrialBatch> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::with_capacity(trials.div_ceil(batch_size) as usize);
    let mut remaining = trials;
    while remaining > 0 {
        let size = remaining.min(batch_size);
        batches.push(TrialBatch {
            trials: size,
            seed: rng.r#gen(),
        });
        remaining -= size;
    }
    batches
}

/// Executes independent trial batches and sums their tallies.
pub trait TrialRunner: Send + Sync {
    fn run<F>(&self, batches: &[TrialBatch], job: F) -> Result<TrialTally, EquityError>
    where
        F: Fn(&TrialBatch) -> Result<TrialTally, EquityError> + Send + Sync;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialRunner;

impl TrialRunner for SequentialRunner {
    fn run<F>(&self, batches: &[TrialBatch], job: F) -> Result<TrialTally, EquityError>
    where
        F: Fn(&TrialBatch) -> Result<TrialTally, EquityError> + Send + Sync,
    {
        batches
            .iter()
            .try_fold(TrialTally::default(), |acc, batch| Ok(acc + job(batch)?))
    }
}

/// Runs batches on a rayon pool. A failing or panicking batch fails the whole run.
#[derive(Clone, Default)]
pub struct RayonRunner {
    pool: Option<Arc<ThreadPool>>,
}

impl RayonRunner {
    /// Uses rayon's global pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl std::fmt::Debug for RayonRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonRunner")
            .field(
                "threads",
                &self
                    .pool
                    .as_ref()
                    .map_or_else(rayon::current_num_threads, |p| p.current_num_threads()),
            )
            .finish()
    }
}

impl TrialRunner for RayonRunner {
    fn run<F>(&self, batches: &[TrialBatch], job: F) -> Result<TrialTally, EquityError>
    where
        F: Fn(&TrialBatch) -> Result<TrialTally, EquityError> + Send + Sync,
    {
        let reduce = || {
            batches
                .par_iter()
                .map(&job)
                .try_reduce(TrialTally::default, |a, b| Ok(a + b))
        };
        let outcome = match &self.pool {
            Some(pool) => catch_unwind(AssertUnwindSafe(|| pool.install(reduce))),
            None => catch_unwind(AssertUnwindSafe(reduce)),
        };
        outcome.unwrap_or_else(|panic| {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            Err(EquityError::Worker(message))
        })
    }
}
