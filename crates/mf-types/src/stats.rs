use chrono::{DateTime, Utc};
use dashmap::DashSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::point::Point;
use crate::result::SelectionResult;

/// Immutable metadata attached to one search run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub dataset_name: String,
    pub feature_count: usize,
    pub instance_count: usize,
    pub measure_names: Vec<String>,
}

impl RunMeta {
    pub fn of(dataset: &Dataset, measure_names: Vec<String>) -> Self {
        Self {
            dataset_name: dataset.name().to_string(),
            feature_count: dataset.feature_count(),
            instance_count: dataset.instance_count(),
            measure_names,
        }
    }
}

/// Mutable, thread-safe aggregate of one search run.
///
/// Shared by every worker of a run via `Arc`. The best-result slot and the
/// visited-point registry are the only mutable state the workers touch; both
/// are safe under unordered concurrent access without external locking.
#[derive(Debug)]
pub struct RunStats {
    id: Uuid,
    algorithm: String,
    meta: RunMeta,
    started_at: DateTime<Utc>,
    finished_at: RwLock<Option<DateTime<Utc>>>,
    best: RwLock<Option<SelectionResult>>,
    visited: DashSet<Point>,
    visited_count: AtomicUsize,
}

impl RunStats {
    pub fn new(algorithm: impl Into<String>, meta: RunMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            algorithm: algorithm.into(),
            meta,
            started_at: Utc::now(),
            finished_at: RwLock::new(None),
            best: RwLock::new(None),
            visited: DashSet::new(),
            visited_count: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn meta(&self) -> &RunMeta {
        &self.meta
    }

    /// Offer a candidate for the best-result slot. The read-compare-write is
    /// a single operation under one write lock, so concurrent improving
    /// offers cannot lose an update or leave the slot half-written. Returns
    /// whether the candidate was accepted.
    pub fn offer(&self, candidate: &SelectionResult) -> bool {
        let mut best = self.best.write();
        match best.as_ref() {
            Some(current) if !candidate.better_than(current) => false,
            _ => {
                *best = Some(candidate.clone());
                true
            }
        }
    }

    /// Register a point in the visited registry. Returns `true` exactly once
    /// per distinct point: insertion is the single source of truth for
    /// "already evaluated", and the caller must only evaluate on `true`.
    pub fn register(&self, point: &Point) -> bool {
        if self.visited.insert(point.clone()) {
            self.visited_count.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    pub fn is_visited(&self, point: &Point) -> bool {
        self.visited.contains(point)
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count.load(Ordering::Relaxed)
    }

    pub fn best(&self) -> Option<SelectionResult> {
        self.best.read().clone()
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best.read().as_ref().map(SelectionResult::score)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        *self.finished_at.read()
    }

    /// Stamp the finish time. Idempotent: only the first call sticks.
    pub fn mark_finished(&self) {
        let mut finished = self.finished_at.write();
        if finished.is_none() {
            *finished = Some(Utc::now());
        }
    }

    /// Wall-clock cost of the run; `None` until `mark_finished`.
    pub fn work_time(&self) -> Option<chrono::Duration> {
        self.finished_at().map(|end| end - self.started_at)
    }

    /// Serializable snapshot for reporting code.
    pub fn summary(&self) -> RunSummary {
        let best = self.best();
        RunSummary {
            id: self.id,
            algorithm: self.algorithm.clone(),
            meta: self.meta.clone(),
            best_point: best.as_ref().map(|r| r.point().clone()),
            best_score: best.as_ref().map(SelectionResult::score),
            visited_points: self.visited_count(),
            started_at: self.started_at,
            finished_at: self.finished_at(),
        }
    }
}

/// Point-in-time snapshot of a run, comparable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub algorithm: String,
    pub meta: RunMeta,
    pub best_point: Option<Point>,
    pub best_score: Option<f64>,
    pub visited_points: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn result(score: f64) -> SelectionResult {
        SelectionResult::new(Point::new(vec![score]), vec![0], score)
    }

    #[test]
    fn offer_keeps_strictly_better_only() {
        let stats = RunStats::new("test", RunMeta::default());
        assert!(stats.offer(&result(0.5)));
        assert!(!stats.offer(&result(0.5))); // tie: first found wins
        assert!(!stats.offer(&result(0.4)));
        assert!(stats.offer(&result(0.6)));
        assert_eq!(stats.best_score(), Some(0.6));
    }

    #[test]
    fn offer_is_monotonic_under_concurrency() {
        let stats = Arc::new(RunStats::new("test", RunMeta::default()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for i in 0..100 {
                        let offered = (t * 100 + i) as f64 / 1000.0;
                        stats.offer(&result(offered));
                        // Once offered, no later read drops below it.
                        assert!(stats.best_score().unwrap() >= offered);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.best_score(), Some(0.799));
    }

    #[test]
    fn register_counts_distinct_points_once() {
        let stats = Arc::new(RunStats::new("test", RunMeta::default()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for i in 0..50 {
                        stats.register(&Point::new(vec![i as f64]));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.visited_count(), 50);
        assert!(stats.is_visited(&Point::new(vec![0.0])));
        assert!(!stats.is_visited(&Point::new(vec![50.0])));
    }

    #[test]
    fn mark_finished_is_idempotent() {
        let stats = RunStats::new("test", RunMeta::default());
        assert!(stats.work_time().is_none());
        stats.mark_finished();
        let first = stats.finished_at();
        stats.mark_finished();
        assert_eq!(stats.finished_at(), first);
        assert!(stats.work_time().is_some());
    }

    #[test]
    fn summary_snapshot_serializes() {
        let stats = RunStats::new("test", RunMeta::default());
        stats.offer(&result(0.7));
        stats.register(&Point::new(vec![0.7]));
        stats.mark_finished();
        let summary = stats.summary();
        assert_eq!(summary.best_score, Some(0.7));
        assert_eq!(summary.visited_points, 1);
        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
