//! Point evaluation: maps a search point to a scored feature subset.

use rayon::prelude::*;
use tracing::debug;

use mf_select::{MeasureMatrix, NormalizationMode};
use mf_types::{
    evaluation_error, AlgorithmConfig, Dataset, FoldPair, MfResult, Point, RunMeta, RunStats,
    SelectionResult,
};

/// Scores one point of the search space.
///
/// The production implementation wires the dataset filter, splitter and fold
/// evaluator together; tests substitute synthetic scoring functions.
pub trait Evaluator: Send + Sync {
    /// Produce a `SelectionResult` for `point`, offering it to the run's
    /// best-result slot before returning.
    fn evaluate(&self, point: &Point, stats: &RunStats) -> MfResult<SelectionResult>;

    /// Metadata describing what this evaluator scores against.
    fn meta(&self) -> RunMeta {
        RunMeta::default()
    }
}

/// Production evaluator: weighted-sum ranking, top-N filtering, fold
/// splitting and cross-validated scoring.
///
/// The per-measure relevance scores are computed once at construction and
/// reused for every point; only the weighting changes between points.
pub struct PointEvaluator {
    dataset: Dataset,
    config: AlgorithmConfig,
    matrix: MeasureMatrix,
    parallel_folds: bool,
}

impl PointEvaluator {
    pub fn new(
        dataset: Dataset,
        config: AlgorithmConfig,
        normalization: NormalizationMode,
    ) -> MfResult<Self> {
        config.validate()?;
        let matrix = MeasureMatrix::compute(&dataset, config.measures(), normalization)?;
        Ok(Self {
            dataset,
            config,
            matrix,
            parallel_folds: false,
        })
    }

    /// Evaluate the folds of each point in parallel on the run's worker pool.
    pub fn with_parallel_folds(mut self) -> Self {
        self.parallel_folds = true;
        self
    }

    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn fold_scores(&self, folds: &[FoldPair]) -> MfResult<Vec<f64>> {
        let evaluator = self.config.fold_evaluator();
        if self.parallel_folds {
            folds
                .par_iter()
                .map(|fold| evaluator.evaluate(&fold.train, &fold.test))
                .collect()
        } else {
            folds
                .iter()
                .map(|fold| evaluator.evaluate(&fold.train, &fold.test))
                .collect()
        }
    }
}

impl Evaluator for PointEvaluator {
    fn evaluate(&self, point: &Point, stats: &RunStats) -> MfResult<SelectionResult> {
        let ranking = self.matrix.weighted_ranking(point)?;
        let kept =
            self.config
                .filter()
                .filter(&self.dataset, &ranking, self.config.feature_target())?;
        let instances = self.dataset.instances_for(&kept)?;
        let folds = self.config.splitter().split(
            &instances,
            self.config.test_fraction(),
            self.config.folds(),
        )?;
        if folds.is_empty() {
            return Err(evaluation_error!("splitter produced no folds"));
        }
        // All folds complete before aggregation; no partial means.
        let scores = self.fold_scores(&folds)?;
        let score = scores.iter().sum::<f64>() / scores.len() as f64;
        debug!(point = %point, score, features = kept.len(), "evaluated point");
        let result = SelectionResult::new(point.clone(), kept, score);
        stats.offer(&result);
        Ok(result)
    }

    fn meta(&self) -> RunMeta {
        RunMeta::of(&self.dataset, self.config.measure_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_select::{OrderSplitter, PreferredSizeFilter};
    use mf_types::{
        DatasetFilter, DatasetSplitter, FoldEvaluator, InstanceView, RelevanceMeasure, RunMeta,
    };
    use std::sync::Arc;

    /// Pearson-free stand-in: scores a feature by how often its sign matches
    /// the label.
    struct SignAgreement;
    impl RelevanceMeasure for SignAgreement {
        fn name(&self) -> &str {
            "sign_agreement"
        }
        fn score(&self, feature: &[f64], labels: &[u32]) -> f64 {
            let matches = feature
                .iter()
                .zip(labels)
                .filter(|(&v, &l)| (v > 0.0) == (l == 1))
                .count();
            matches as f64 / labels.len() as f64
        }
    }

    /// Scores a fold by the share of positive labels in its test view.
    struct PositiveShare;
    impl FoldEvaluator for PositiveShare {
        fn evaluate(&self, _train: &InstanceView, test: &InstanceView) -> MfResult<f64> {
            let positives = test.labels().iter().filter(|&&l| l == 1).count();
            Ok(positives as f64 / test.len() as f64)
        }
    }

    struct FailingFoldEvaluator;
    impl FoldEvaluator for FailingFoldEvaluator {
        fn evaluate(&self, _: &InstanceView, _: &InstanceView) -> MfResult<f64> {
            Err(evaluation_error!("classifier blew up"))
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "toy",
            vec![
                vec![1.0, -1.0, 1.0, -1.0],
                vec![1.0, 1.0, -1.0, -1.0],
                vec![-1.0, -1.0, -1.0, -1.0],
            ],
            vec![1, 0, 1, 0],
        )
        .unwrap()
    }

    fn config(
        fold_evaluator: Arc<dyn FoldEvaluator>,
    ) -> AlgorithmConfig {
        AlgorithmConfig::new(
            0.1,
            vec![Arc::new(SignAgreement), Arc::new(SignAgreement)],
            Arc::new(PreferredSizeFilter::new()) as Arc<dyn DatasetFilter>,
            Arc::new(OrderSplitter::new(vec![0, 1, 2, 3])) as Arc<dyn DatasetSplitter>,
            fold_evaluator,
        )
        .with_feature_target(2)
        .with_folds(2)
    }

    #[test]
    fn evaluates_point_and_offers_best() {
        let evaluator =
            PointEvaluator::new(dataset(), config(Arc::new(PositiveShare)), NormalizationMode::None)
                .unwrap();
        let stats = RunStats::new("test", evaluator.meta());
        let point = Point::new(vec![1.0, 0.0]);
        let result = evaluator.evaluate(&point, &stats).unwrap();
        assert_eq!(result.selected_features().len(), 2);
        // Folds [0,1] and [2,3] each contain one positive label.
        assert_eq!(result.score(), 0.5);
        assert_eq!(stats.best_score(), Some(0.5));
        // Evaluation never mutates the point.
        assert_eq!(point.coordinates(), &[1.0, 0.0]);
    }

    #[test]
    fn fold_failure_propagates() {
        let evaluator = PointEvaluator::new(
            dataset(),
            config(Arc::new(FailingFoldEvaluator)),
            NormalizationMode::None,
        )
        .unwrap();
        let stats = RunStats::new("test", RunMeta::default());
        let err = evaluator.evaluate(&Point::new(vec![1.0, 0.0]), &stats);
        assert!(err.is_err());
        assert!(stats.best().is_none());
    }

    #[test]
    fn meta_reflects_dataset_and_measures() {
        let evaluator =
            PointEvaluator::new(dataset(), config(Arc::new(PositiveShare)), NormalizationMode::None)
                .unwrap();
        let meta = evaluator.meta();
        assert_eq!(meta.dataset_name, "toy");
        assert_eq!(meta.feature_count, 3);
        assert_eq!(meta.instance_count, 4);
        assert_eq!(meta.measure_names.len(), 2);
    }

    #[test]
    fn parallel_folds_match_sequential_scores() {
        let sequential =
            PointEvaluator::new(dataset(), config(Arc::new(PositiveShare)), NormalizationMode::None)
                .unwrap();
        let parallel =
            PointEvaluator::new(dataset(), config(Arc::new(PositiveShare)), NormalizationMode::None)
                .unwrap()
                .with_parallel_folds();
        let point = Point::new(vec![0.5, 0.5]);
        let a = sequential
            .evaluate(&point, &RunStats::new("a", RunMeta::default()))
            .unwrap();
        let b = parallel
            .evaluate(&point, &RunStats::new("b", RunMeta::default()))
            .unwrap();
        assert_eq!(a.score(), b.score());
        assert_eq!(a.selected_features(), b.selected_features());
    }
}
