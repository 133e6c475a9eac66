//! # mf-select
//!
//! Feature-ranking and fold-splitting policies for the MeLiF search:
//! weighted-ensemble ranking with score normalization, top-N/percent/cutting
//! rule filters, deterministic and random fold splitters, and an F1 helper
//! for fold evaluator implementations.

pub mod filters;
pub mod ranking;
pub mod score;
pub mod splitters;

pub use filters::{CuttingRuleFilter, PercentFilter, PreferredSizeFilter};
pub use ranking::{MeasureMatrix, NormalizationMode};
pub use score::f1_score;
pub use splitters::{OrderSplitter, RandomSplitter};
