//! # mf-engine
//!
//! Parallel coordinate-ascent search engines for MeLiF feature selection.
//!
//! Provides the point evaluator (weighted ranking, filtering, fold
//! splitting, cross-validated scoring), the search engine variants
//! (sequential, per-point-parallel, per-probe-parallel), the baseline
//! engine for overhead measurement, and the worker-pool handle.

pub mod evaluator;
pub mod nop;
pub mod pool;
pub mod search;

pub use evaluator::{Evaluator, PointEvaluator};
pub use nop::NopMeLiF;
pub use pool::PoolHandle;
pub use search::MeLiF;
