use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Outcome of scoring one point: the point itself, the feature subset it
/// selected, and the cross-validated score. Carried through the search so the
/// engine never recomputes which features a point selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    point: Point,
    selected_features: Vec<usize>,
    score: f64,
}

impl SelectionResult {
    pub fn new(point: Point, selected_features: Vec<usize>, score: f64) -> Self {
        Self {
            point,
            selected_features,
            score,
        }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn selected_features(&self) -> &[usize] {
        &self.selected_features
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Strict comparison by score only. Ties are not re-broken: under
    /// concurrent updates the first result recorded at a given score wins.
    pub fn better_than(&self, other: &SelectionResult) -> bool {
        self.score > other.score
    }
}
