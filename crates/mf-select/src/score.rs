//! Classifier-agnostic scoring helpers for fold evaluator implementations.

/// Binary F1 score over expected/predicted label slices, with label 1 as the
/// positive class. Zero denominators (no predicted or no actual positives)
/// yield 0.0 rather than NaN.
pub fn f1_score(expected: &[u32], predicted: &[u32]) -> f64 {
    debug_assert_eq!(expected.len(), predicted.len());
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&e, &p) in expected.iter().zip(predicted) {
        match (e, p) {
            (1, 1) => tp += 1,
            (_, 1) => fp += 1,
            (1, _) => fn_ += 1,
            _ => {}
        }
    }
    let precision = if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    };
    let recall = if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    };
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}
