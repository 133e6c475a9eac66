use crate::dataset::{Dataset, FoldPair, InstanceView};
use crate::errors::MfResult;

/// Per-feature scoring function used to rank features before filtering.
/// Higher means more relevant. The core only needs scores to be combinable by
/// weighted sum across an arbitrary number of measures; it makes no
/// assumption about the formula.
pub trait RelevanceMeasure: Send + Sync {
    fn name(&self) -> &str;

    /// Score one feature's values against the class labels.
    fn score(&self, feature: &[f64], labels: &[u32]) -> f64;

    /// Declared lower bound of the measure, used by measure-based
    /// normalization.
    fn min_value(&self) -> f64 {
        0.0
    }

    /// Declared upper bound of the measure.
    fn max_value(&self) -> f64 {
        1.0
    }
}

/// Keeps a subset of features given their ensemble ranking scores.
/// Must be deterministic given identical inputs. Returns the kept feature
/// indices, best-ranked first.
pub trait DatasetFilter: Send + Sync {
    fn filter(
        &self,
        dataset: &Dataset,
        ranking: &[f64],
        target_count: usize,
    ) -> MfResult<Vec<usize>>;
}

/// Produces the train/test fold pairs for cross-validated scoring. The core
/// treats the split as opaque.
pub trait DatasetSplitter: Send + Sync {
    fn split(
        &self,
        instances: &InstanceView,
        test_fraction: f64,
        folds: usize,
    ) -> MfResult<Vec<FoldPair>>;
}

/// Trains and evaluates the downstream classifier on one fold, reporting a
/// score in a bounded range (e.g. 0..1). The core averages fold scores.
pub trait FoldEvaluator: Send + Sync {
    fn evaluate(&self, train: &InstanceView, test: &InstanceView) -> MfResult<f64>;
}
