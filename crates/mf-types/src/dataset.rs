use serde::{Deserialize, Serialize};

use crate::dataset_error;
use crate::errors::MfResult;

/// An immutable dataset in feature-oriented form: one row of values per
/// feature (a column per instance) plus one class label per instance.
///
/// Ingestion/parsing happens outside the core; this type only validates shape
/// on construction and exposes the two views the search needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    name: String,
    feature_values: Vec<Vec<f64>>,
    labels: Vec<u32>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        feature_values: Vec<Vec<f64>>,
        labels: Vec<u32>,
    ) -> MfResult<Self> {
        for (i, row) in feature_values.iter().enumerate() {
            if row.len() != labels.len() {
                return Err(dataset_error!(
                    "feature {} has {} values but there are {} labels",
                    i,
                    row.len(),
                    labels.len()
                ));
            }
        }
        Ok(Self {
            name: name.into(),
            feature_values,
            labels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature_count(&self) -> usize {
        self.feature_values.len()
    }

    pub fn instance_count(&self) -> usize {
        self.labels.len()
    }

    pub fn feature(&self, index: usize) -> &[f64] {
        &self.feature_values[index]
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Transpose the given feature subset into an instance-oriented view.
    pub fn instances_for(&self, feature_indices: &[usize]) -> MfResult<InstanceView> {
        for &idx in feature_indices {
            if idx >= self.feature_count() {
                return Err(dataset_error!(
                    "feature index {} out of range ({} features)",
                    idx,
                    self.feature_count()
                ));
            }
        }
        let rows = (0..self.instance_count())
            .map(|inst| {
                feature_indices
                    .iter()
                    .map(|&f| self.feature_values[f][inst])
                    .collect()
            })
            .collect();
        InstanceView::new(rows, self.labels.clone())
    }
}

/// Instance-oriented view: one row of feature values per instance, with its
/// class label. This is what splitters partition and fold evaluators consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceView {
    rows: Vec<Vec<f64>>,
    labels: Vec<u32>,
}

impl InstanceView {
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<u32>) -> MfResult<Self> {
        if rows.len() != labels.len() {
            return Err(dataset_error!(
                "{} instance rows but {} labels",
                rows.len(),
                labels.len()
            ));
        }
        if let Some(width) = rows.first().map(Vec::len) {
            for (i, row) in rows.iter().enumerate() {
                if row.len() != width {
                    return Err(dataset_error!(
                        "instance {} has {} values, expected {}",
                        i,
                        row.len(),
                        width
                    ));
                }
            }
        }
        Ok(Self { rows, labels })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn label(&self, index: usize) -> u32 {
        self.labels[index]
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Sub-view containing the given instances, in the given order.
    pub fn select(&self, indices: &[usize]) -> MfResult<InstanceView> {
        for &idx in indices {
            if idx >= self.len() {
                return Err(dataset_error!(
                    "instance index {} out of range ({} instances)",
                    idx,
                    self.len()
                ));
            }
        }
        let rows = indices.iter().map(|&i| self.rows[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Ok(Self { rows, labels })
    }
}

/// One train/test partition used for cross-validated scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldPair {
    pub train: InstanceView,
    pub test: InstanceView,
}

impl FoldPair {
    pub fn new(train: InstanceView, test: InstanceView) -> Self {
        Self { train, test }
    }
}
