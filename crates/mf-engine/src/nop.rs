//! Baseline engine that replays point visits without evaluating anything.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

use mf_types::{MfResult, Point, RunMeta, RunStats};

use crate::pool::PoolHandle;

/// Replays a target number of point visits with zero evaluation cost,
/// isolating the search's own overhead (scheduling, synchronization,
/// registry churn) from classification cost. The target visit count is
/// typically taken from a prior real run.
pub struct NopMeLiF {
    pool: PoolHandle,
    target_visits: usize,
}

impl NopMeLiF {
    pub fn new(workers: usize, target_visits: usize) -> MfResult<Self> {
        Ok(Self {
            pool: PoolHandle::owned(workers)?,
            target_visits,
        })
    }

    pub fn with_pool(pool: PoolHandle, target_visits: usize) -> Self {
        Self {
            pool,
            target_visits,
        }
    }

    /// Dispatch `target_visits` distinct synthetic points across the pool,
    /// registering each in a fresh `RunStats`. No evaluator is ever invoked.
    pub fn run(&self, name: &str) -> MfResult<Arc<RunStats>> {
        let stats = Arc::new(RunStats::new(name, RunMeta::default()));
        info!(run = name, target = self.target_visits, "started baseline run");
        self.pool.get().install(|| {
            (0..self.target_visits).into_par_iter().for_each(|i| {
                stats.register(&Point::new(vec![i as f64]));
            });
        });
        stats.mark_finished();
        info!(
            run = name,
            visited = stats.visited_count(),
            "finished baseline run in {:?}",
            stats.work_time()
        );
        Ok(stats)
    }
}
