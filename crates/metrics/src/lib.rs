//! Model verification statistics.
//!
//! Pairwise metrics between a predicted and a reference series (bias, RMS
//! differences, skill scores, Nash-Sutcliffe and Kling-Gupta efficiencies,
//! Brier scores) and the aggregate statistics consumed by target and Taylor
//! diagrams.
//!
//! All inputs are validated: series must have equal, non-zero length and
//! finite values. Violations are reported as [`MetricsError`].

mod duplicates;
mod efficiency;
mod elementary;
mod error;
mod input;
mod output;
mod probability;
mod target;
mod taylor;
mod utils;

pub use duplicates::{DuplicatePair, check_duplicate_stats, report_duplicate_stats};
pub use efficiency::{KgeWeights, kge09, kge12, nse};
pub use elementary::{bias, bias_percent, centered_rms_dev, rmsd, skill_score_murphy};
pub use error::MetricsError;
pub use input::{FieldSet, SeriesInput, error_check_stats};
pub use output::{StatsReport, TargetReport, TargetRow, TaylorReport, TaylorRow, to_json};
pub use probability::{brier_score, skill_score_brier};
pub use target::{StatsKind, TargetSeries, TargetStats, target_statistics};
pub use taylor::{TAYLOR_THRESHOLD, TaylorSeries, TaylorStats, check_taylor_stats, taylor_statistics};
pub use utils::check_arrays;
