//! Per-measure score evaluation and weighted-ensemble ranking.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use mf_types::{evaluation_error, Dataset, MfResult, Point, RelevanceMeasure};

/// How per-measure scores are rescaled before they are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationMode {
    /// Use raw scores as produced by the measure.
    None,
    /// Rescale each measure's scores to [0, 1] by the observed min/max.
    ValueBased,
    /// Rescale by the measure's declared bounds.
    MeasureBased,
}

impl Default for NormalizationMode {
    fn default() -> Self {
        Self::ValueBased
    }
}

fn normalize(values: &mut [f64], min: f64, max: f64) {
    let range = max - min;
    if range == 0.0 {
        values.fill(0.0);
        return;
    }
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}

/// Normalized per-measure, per-feature relevance scores, computed once per
/// run and reused for every point. Row per measure, column per feature.
#[derive(Debug, Clone)]
pub struct MeasureMatrix {
    scores: Vec<Vec<f64>>,
    feature_count: usize,
}

impl MeasureMatrix {
    pub fn compute(
        dataset: &Dataset,
        measures: &[Arc<dyn RelevanceMeasure>],
        mode: NormalizationMode,
    ) -> MfResult<Self> {
        if measures.is_empty() {
            return Err(evaluation_error!("no relevance measures to evaluate"));
        }
        let feature_count = dataset.feature_count();
        let labels = dataset.labels();
        let mut scores = Vec::with_capacity(measures.len());
        for measure in measures {
            let mut row: Vec<f64> = (0..feature_count)
                .map(|i| measure.score(dataset.feature(i), labels))
                .collect();
            match mode {
                NormalizationMode::None => {}
                NormalizationMode::ValueBased => {
                    let min = row.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    if !row.is_empty() {
                        normalize(&mut row, min, max);
                    }
                }
                NormalizationMode::MeasureBased => {
                    normalize(&mut row, measure.min_value(), measure.max_value());
                }
            }
            scores.push(row);
        }
        Ok(Self {
            scores,
            feature_count,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.scores.len()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Combine the per-measure scores into one ranking score per feature,
    /// using the point's coordinates as weights.
    pub fn weighted_ranking(&self, point: &Point) -> MfResult<Vec<f64>> {
        if point.dim() != self.scores.len() {
            return Err(evaluation_error!(
                "point has {} coordinates but {} measures were evaluated",
                point.dim(),
                self.scores.len()
            ));
        }
        let weights = point.coordinates();
        Ok((0..self.feature_count)
            .map(|feature| {
                self.scores
                    .iter()
                    .zip(weights)
                    .map(|(row, w)| w * row[feature])
                    .sum()
            })
            .collect())
    }
}
