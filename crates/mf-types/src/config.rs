use std::fmt;
use std::sync::Arc;

use crate::config_error;
use crate::errors::MfResult;
use crate::traits::{DatasetFilter, DatasetSplitter, FoldEvaluator, RelevanceMeasure};

/// Immutable run configuration: step size, relevance measures (their count
/// fixes point dimensionality), fold/evaluation policy, feature-count target
/// and split ratio, plus handles to the external collaborators.
#[derive(Clone)]
pub struct AlgorithmConfig {
    delta: f64,
    measures: Vec<Arc<dyn RelevanceMeasure>>,
    feature_target: usize,
    folds: usize,
    test_fraction: f64,
    filter: Arc<dyn DatasetFilter>,
    splitter: Arc<dyn DatasetSplitter>,
    fold_evaluator: Arc<dyn FoldEvaluator>,
}

impl AlgorithmConfig {
    pub fn new(
        delta: f64,
        measures: Vec<Arc<dyn RelevanceMeasure>>,
        filter: Arc<dyn DatasetFilter>,
        splitter: Arc<dyn DatasetSplitter>,
        fold_evaluator: Arc<dyn FoldEvaluator>,
    ) -> Self {
        Self {
            delta,
            measures,
            feature_target: 100,
            folds: 10,
            test_fraction: 0.2,
            filter,
            splitter,
            fold_evaluator,
        }
    }

    pub fn with_feature_target(mut self, n: usize) -> Self {
        self.feature_target = n;
        self
    }

    pub fn with_folds(mut self, n: usize) -> Self {
        self.folds = n;
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Fail-fast checks performed before any evaluation.
    pub fn validate(&self) -> MfResult<()> {
        if self.measures.is_empty() {
            return Err(config_error!("at least one relevance measure is required"));
        }
        if self.delta <= 0.0 || !self.delta.is_finite() {
            return Err(config_error!("delta must be positive, got {}", self.delta));
        }
        if self.folds == 0 {
            return Err(config_error!("fold count must be positive"));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(config_error!(
                "test fraction must be in (0, 1), got {}",
                self.test_fraction
            ));
        }
        if self.feature_target == 0 {
            return Err(config_error!("feature target must be positive"));
        }
        Ok(())
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn measures(&self) -> &[Arc<dyn RelevanceMeasure>] {
        &self.measures
    }

    /// Point dimensionality for this configuration.
    pub fn dimensions(&self) -> usize {
        self.measures.len()
    }

    pub fn measure_names(&self) -> Vec<String> {
        self.measures.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn feature_target(&self) -> usize {
        self.feature_target
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    pub fn filter(&self) -> &Arc<dyn DatasetFilter> {
        &self.filter
    }

    pub fn splitter(&self) -> &Arc<dyn DatasetSplitter> {
        &self.splitter
    }

    pub fn fold_evaluator(&self) -> &Arc<dyn FoldEvaluator> {
        &self.fold_evaluator
    }
}

impl fmt::Debug for AlgorithmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmConfig")
            .field("delta", &self.delta)
            .field("measures", &self.measure_names())
            .field("feature_target", &self.feature_target)
            .field("folds", &self.folds)
            .field("test_fraction", &self.test_fraction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, FoldPair, InstanceView};
    use crate::errors::MfError;

    struct DummyMeasure;
    impl RelevanceMeasure for DummyMeasure {
        fn name(&self) -> &str {
            "dummy"
        }
        fn score(&self, _feature: &[f64], _labels: &[u32]) -> f64 {
            0.0
        }
    }

    struct DummyFilter;
    impl DatasetFilter for DummyFilter {
        fn filter(&self, _: &Dataset, _: &[f64], _: usize) -> MfResult<Vec<usize>> {
            Ok(vec![])
        }
    }

    struct DummySplitter;
    impl DatasetSplitter for DummySplitter {
        fn split(&self, _: &InstanceView, _: f64, _: usize) -> MfResult<Vec<FoldPair>> {
            Ok(vec![])
        }
    }

    struct DummyEvaluator;
    impl FoldEvaluator for DummyEvaluator {
        fn evaluate(&self, _: &InstanceView, _: &InstanceView) -> MfResult<f64> {
            Ok(0.0)
        }
    }

    fn config(delta: f64, measures: usize) -> AlgorithmConfig {
        AlgorithmConfig::new(
            delta,
            (0..measures)
                .map(|_| Arc::new(DummyMeasure) as Arc<dyn RelevanceMeasure>)
                .collect(),
            Arc::new(DummyFilter),
            Arc::new(DummySplitter),
            Arc::new(DummyEvaluator),
        )
    }

    #[test]
    fn valid_config_passes() {
        assert!(config(0.1, 4).validate().is_ok());
        assert_eq!(config(0.1, 4).dimensions(), 4);
    }

    #[test]
    fn rejects_empty_measures() {
        match config(0.1, 0).validate() {
            Err(MfError::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_delta_folds_and_fraction() {
        assert!(config(0.0, 2).validate().is_err());
        assert!(config(0.1, 2).with_folds(0).validate().is_err());
        assert!(config(0.1, 2).with_test_fraction(1.0).validate().is_err());
        assert!(config(0.1, 2).with_feature_target(0).validate().is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let c = config(0.1, 2)
            .with_feature_target(50)
            .with_folds(5)
            .with_test_fraction(0.3);
        assert_eq!(c.feature_target(), 50);
        assert_eq!(c.folds(), 5);
        assert_eq!(c.test_fraction(), 0.3);
    }
}
