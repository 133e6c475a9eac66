//! Coordinate-ascent search over the measure-weight space.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use mf_types::{config_error, AlgorithmConfig, MfResult, Point, RunStats, SelectionResult};

use crate::evaluator::Evaluator;
use crate::pool::PoolHandle;

/// How probe and trajectory evaluation is dispatched. One ascent routine
/// serves all variants; only the dispatch differs.
#[derive(Debug)]
enum Dispatch {
    /// Single worker; trajectories and probes evaluated one at a time.
    Sequential,
    /// One worker task per starting point.
    PointParallel(PoolHandle),
    /// The plus/minus probes of one axis evaluated concurrently, with
    /// trajectories also running one per starting point.
    ProbeParallel(PoolHandle),
}

impl Dispatch {
    fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::PointParallel(_) => "point-parallel",
            Self::ProbeParallel(_) => "probe-parallel",
        }
    }
}

/// Coordinate-ascent engine over measure weightings (the MeLiF family).
///
/// From each starting point the engine repeatedly probes `current ± delta`
/// along each axis, accepting the first strictly improving neighbor
/// (plus before minus) and restarting the axis scan on every acceptance,
/// until a full sweep yields no improvement. All workers of one run share
/// the visited-point registry and the best-result slot in `RunStats`.
pub struct MeLiF {
    config: AlgorithmConfig,
    evaluator: Arc<dyn Evaluator>,
    dispatch: Dispatch,
}

impl MeLiF {
    /// Single-threaded engine; the correctness baseline.
    pub fn sequential(config: AlgorithmConfig, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            config,
            evaluator,
            dispatch: Dispatch::Sequential,
        }
    }

    /// One concurrent trajectory per starting point.
    pub fn point_parallel(
        config: AlgorithmConfig,
        evaluator: Arc<dyn Evaluator>,
        pool: PoolHandle,
    ) -> Self {
        Self {
            config,
            evaluator,
            dispatch: Dispatch::PointParallel(pool),
        }
    }

    /// Concurrent trajectories with concurrent plus/minus probes per axis.
    pub fn probe_parallel(
        config: AlgorithmConfig,
        evaluator: Arc<dyn Evaluator>,
        pool: PoolHandle,
    ) -> Self {
        Self {
            config,
            evaluator,
            dispatch: Dispatch::ProbeParallel(pool),
        }
    }

    /// Run the search from the given starting points and return the shared
    /// run statistics once every trajectory has converged.
    ///
    /// Fails fast with a configuration error before any worker is spawned if
    /// a starting point's dimensionality does not match the configured
    /// measure count. Any evaluation failure aborts the whole run.
    pub fn run(&self, name: &str, starting_points: &[Point]) -> MfResult<Arc<RunStats>> {
        self.config.validate()?;
        let dimensions = self.config.dimensions();
        for point in starting_points {
            if point.dim() != dimensions {
                return Err(config_error!(
                    "starting point {} has {} coordinates but {} measures are configured",
                    point,
                    point.dim(),
                    dimensions
                ));
            }
        }

        let stats = Arc::new(RunStats::new(name, self.evaluator.meta()));
        info!(
            run = name,
            dispatch = self.dispatch.name(),
            points = starting_points.len(),
            "started search run at {}",
            stats.started_at()
        );

        let optima: MfResult<Vec<SelectionResult>> = match &self.dispatch {
            Dispatch::Sequential => starting_points
                .iter()
                .map(|p| self.ascend(p, &stats))
                .collect(),
            Dispatch::PointParallel(pool) | Dispatch::ProbeParallel(pool) => {
                pool.get().install(|| {
                    starting_points
                        .par_iter()
                        .map(|p| self.ascend(p, &stats))
                        .collect()
                })
            }
        };
        let optima = optima?;

        stats.mark_finished();
        if let Some(best) = stats.best() {
            info!(
                run = name,
                best_point = %best.point(),
                best_score = best.score(),
                visited = stats.visited_count(),
                trajectories = optima.len(),
                "finished search run in {:?}",
                stats.work_time()
            );
        }
        Ok(stats)
    }

    /// Evaluate a candidate unless the registry already holds it. A point
    /// seen before reports no improvement; the registry suppresses
    /// re-evaluation, it does not cache scores.
    fn visit(&self, point: &Point, stats: &RunStats) -> MfResult<Option<SelectionResult>> {
        if stats.register(point) {
            Ok(Some(self.evaluator.evaluate(point, stats)?))
        } else {
            Ok(None)
        }
    }

    /// Coordinate ascent for one trajectory: first-improvement acceptance,
    /// plus before minus, axis scan restarted on every acceptance.
    fn ascend(&self, start: &Point, stats: &RunStats) -> MfResult<SelectionResult> {
        stats.register(start);
        let mut best = self.evaluator.evaluate(start, stats)?;
        let mut current = start.clone();
        let delta = self.config.delta();
        let probes_concurrent = matches!(self.dispatch, Dispatch::ProbeParallel(_));

        let mut changed = true;
        while changed {
            changed = false;
            for axis in 0..current.dim() {
                let plus = current.with_offset(axis, delta);
                let minus = current.with_offset(axis, -delta);

                let (plus_result, minus_result) = if probes_concurrent {
                    let (p, m) = rayon::join(
                        || self.visit(&plus, stats),
                        || self.visit(&minus, stats),
                    );
                    (p?, m?)
                } else {
                    let p = self.visit(&plus, stats)?;
                    if p.as_ref().is_some_and(|r| r.better_than(&best)) {
                        // Plus already improves; the minus probe is skipped.
                        (p, None)
                    } else {
                        let m = self.visit(&minus, stats)?;
                        (p, m)
                    }
                };

                if let Some(result) = plus_result {
                    if result.better_than(&best) {
                        best = result;
                        current = plus;
                        changed = true;
                        break;
                    }
                }
                if let Some(result) = minus_result {
                    if result.better_than(&best) {
                        best = result;
                        current = minus;
                        changed = true;
                        break;
                    }
                }
            }
        }
        debug!(optimum = %current, score = best.score(), "trajectory converged");
        Ok(best)
    }
}
