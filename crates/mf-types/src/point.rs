use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A weight vector over relevance measures; one search-space coordinate.
///
/// Points are value objects: perturbation builds a new `Point` from a copy of
/// the parent's coordinates, so a point published to another worker is never
/// mutated afterwards. Equality and ordering are coordinate-wise (bitwise
/// equality, `f64::total_cmp` ordering), so two points with identical
/// coordinates are the same search state regardless of how they were reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// Point with every coordinate set to `value`.
    pub fn uniform(dim: usize, value: f64) -> Self {
        Self {
            coordinates: vec![value; dim],
        }
    }

    /// Point with coordinate `axis` set to 1.0 and all others to 0.0.
    pub fn unit(dim: usize, axis: usize) -> Self {
        let mut coordinates = vec![0.0; dim];
        coordinates[axis] = 1.0;
        Self { coordinates }
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn dim(&self) -> usize {
        self.coordinates.len()
    }

    /// New point with `delta` added to coordinate `axis`; all other
    /// coordinates are copied unchanged.
    pub fn with_offset(&self, axis: usize, delta: f64) -> Self {
        let mut coordinates = self.coordinates.clone();
        coordinates[axis] += delta;
        Self { coordinates }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in &self.coordinates {
            state.write_u64(c.to_bits());
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.coordinates.iter().zip(&other.coordinates) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        self.coordinates.len().cmp(&other.coordinates.len())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.3}")?;
        }
        write!(f, "]")
    }
}
