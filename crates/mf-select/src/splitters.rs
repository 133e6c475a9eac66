//! Fold splitters: partition an instance view into train/test pairs.

use rand::seq::SliceRandom;

use mf_types::{evaluation_error, DatasetSplitter, FoldPair, InstanceView, MfResult};

/// Deterministic k-fold splitter over a caller-supplied instance order.
///
/// The order is typically a shuffle fixed once per experiment so that every
/// point is scored against identical folds. The test fraction is implied by
/// the fold count and ignored.
#[derive(Debug, Clone)]
pub struct OrderSplitter {
    order: Vec<usize>,
}

impl OrderSplitter {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    fn check_order(&self, instances: &InstanceView) -> MfResult<()> {
        if self.order.len() != instances.len() {
            return Err(evaluation_error!(
                "instance order has {} entries but view has {} instances",
                self.order.len(),
                instances.len()
            ));
        }
        let mut seen = vec![false; instances.len()];
        for &idx in &self.order {
            if idx >= instances.len() || seen[idx] {
                return Err(evaluation_error!(
                    "instance order is not a permutation of 0..{}",
                    instances.len()
                ));
            }
            seen[idx] = true;
        }
        Ok(())
    }
}

impl DatasetSplitter for OrderSplitter {
    fn split(
        &self,
        instances: &InstanceView,
        _test_fraction: f64,
        folds: usize,
    ) -> MfResult<Vec<FoldPair>> {
        self.check_order(instances)?;
        if folds == 0 || folds > instances.len() {
            return Err(evaluation_error!(
                "cannot split {} instances into {} folds",
                instances.len(),
                folds
            ));
        }
        let n = self.order.len();
        let base = n / folds;
        let extra = n % folds;
        let mut pairs = Vec::with_capacity(folds);
        let mut start = 0;
        for fold in 0..folds {
            let size = base + usize::from(fold < extra);
            let end = start + size;
            let test: Vec<usize> = self.order[start..end].to_vec();
            let train: Vec<usize> = self.order[..start]
                .iter()
                .chain(&self.order[end..])
                .copied()
                .collect();
            pairs.push(FoldPair::new(
                instances.select(&train)?,
                instances.select(&test)?,
            ));
            start = end;
        }
        Ok(pairs)
    }
}

/// Splits randomly by test fraction, independently for each fold.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSplitter;

impl RandomSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetSplitter for RandomSplitter {
    fn split(
        &self,
        instances: &InstanceView,
        test_fraction: f64,
        folds: usize,
    ) -> MfResult<Vec<FoldPair>> {
        let n = instances.len();
        let test_count = ((n as f64 * test_fraction).round() as usize).max(1);
        if test_count >= n {
            return Err(evaluation_error!(
                "test fraction {} leaves no training instances out of {}",
                test_fraction,
                n
            ));
        }
        let mut rng = rand::rng();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut pairs = Vec::with_capacity(folds);
        for _ in 0..folds {
            indices.shuffle(&mut rng);
            pairs.push(FoldPair::new(
                instances.select(&indices[test_count..])?,
                instances.select(&indices[..test_count])?,
            ));
        }
        Ok(pairs)
    }
}
