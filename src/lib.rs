//! Model skill statistics with target and Taylor diagrams.
//!
//! Re-exports the workspace crates and adds the TOML configuration layer
//! and the [`compare`] pipeline, which runs statistics, diagrams and the
//! JSON report for a set of named models against one reference series.
//!
//! ```no_run
//! use skill::{SkillConfig, compare};
//!
//! let config = SkillConfig::load("skill.toml")?;
//! let reference = [1.0, 2.0, 3.0, 2.5, 1.5];
//! let model = [1.2, 2.1, 2.7, 2.4, 1.9];
//! let comparison = compare(&reference, &[("M1", &model[..])], &config)?;
//! println!("{}", comparison.report.target.rows[0].rmsd);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod compare;
pub mod config;
pub mod convert;
pub mod logging;

pub use compare::{Comparison, STATS_FILE, TARGET_FILE, TAYLOR_FILE, compare};
pub use config::SkillConfig;

pub use skill_diagram as diagram;
pub use skill_metrics as metrics;
pub use skill_stats as stats;
