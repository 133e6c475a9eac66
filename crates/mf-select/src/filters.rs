//! Feature filters: keep a subset of features by their ensemble ranking.

use tracing::debug;

use mf_types::{evaluation_error, Dataset, DatasetFilter, MfResult};

/// Indices 0..n sorted by ranking score, best first; ties broken by index so
/// the order is deterministic for identical inputs.
fn ranked_indices(ranking: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..ranking.len()).collect();
    indices.sort_by(|&a, &b| {
        ranking[b]
            .total_cmp(&ranking[a])
            .then_with(|| a.cmp(&b))
    });
    indices
}

fn check_ranking_len(dataset: &Dataset, ranking: &[f64]) -> MfResult<()> {
    if ranking.len() != dataset.feature_count() {
        return Err(evaluation_error!(
            "ranking has {} scores but dataset has {} features",
            ranking.len(),
            dataset.feature_count()
        ));
    }
    Ok(())
}

/// Keeps the top `target_count` features by ranking score.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredSizeFilter;

impl PreferredSizeFilter {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetFilter for PreferredSizeFilter {
    fn filter(
        &self,
        dataset: &Dataset,
        ranking: &[f64],
        target_count: usize,
    ) -> MfResult<Vec<usize>> {
        check_ranking_len(dataset, ranking)?;
        let mut kept = ranked_indices(ranking);
        kept.truncate(target_count);
        debug!(kept = kept.len(), target = target_count, "filtered by preferred size");
        Ok(kept)
    }
}

/// Keeps the top `percent` of features by ranking score, ignoring the
/// configured target count.
#[derive(Debug, Clone, Copy)]
pub struct PercentFilter {
    percent: u32,
}

impl PercentFilter {
    pub fn new(percent: u32) -> Self {
        Self { percent }
    }
}

impl DatasetFilter for PercentFilter {
    fn filter(
        &self,
        dataset: &Dataset,
        ranking: &[f64],
        _target_count: usize,
    ) -> MfResult<Vec<usize>> {
        check_ranking_len(dataset, ranking)?;
        let keep = ranking.len() * self.percent as usize / 100;
        let mut kept = ranked_indices(ranking);
        kept.truncate(keep);
        Ok(kept)
    }
}

/// Keeps the features whose ensemble score falls within one standard
/// deviation of the mean, ignoring the configured target count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuttingRuleFilter;

impl CuttingRuleFilter {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetFilter for CuttingRuleFilter {
    fn filter(
        &self,
        dataset: &Dataset,
        ranking: &[f64],
        _target_count: usize,
    ) -> MfResult<Vec<usize>> {
        check_ranking_len(dataset, ranking)?;
        if ranking.is_empty() {
            return Ok(vec![]);
        }
        let mean = ranking.iter().sum::<f64>() / ranking.len() as f64;
        let std = (ranking.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / ranking.len() as f64)
            .sqrt();
        let kept: Vec<usize> = ranked_indices(ranking)
            .into_iter()
            .filter(|&i| ranking[i] > mean - std && ranking[i] < mean + std)
            .collect();
        Ok(kept)
    }
}
