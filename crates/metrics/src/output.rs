//! JSON statistics reports for target and Taylor diagrams.

use serde::Serialize;

use crate::error::MetricsError;
use crate::target::{StatsKind, TargetStats};
use crate::taylor::TaylorStats;

/// One labelled row of target statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRow {
    pub label: String,
    pub bias: f64,
    pub crmsd: f64,
    pub rmsd: f64,
}

/// One labelled row of Taylor statistics for a predicted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaylorRow {
    pub label: String,
    pub sdev: f64,
    pub crmsd: f64,
    pub ccoef: f64,
}

/// Table of target statistics, one row per model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    /// Description of the data set, e.g. an experiment name.
    pub title: String,
    /// Normalisation shared by every row.
    #[serde(rename = "type")]
    pub kind: StatsKind,
    pub rows: Vec<TargetRow>,
}

impl TargetReport {
    /// Creates an empty report.
    pub fn new(title: impl Into<String>, kind: StatsKind) -> Self {
        Self {
            title: title.into(),
            kind,
            rows: Vec::new(),
        }
    }

    /// Appends a labelled row.
    pub fn push(&mut self, label: impl Into<String>, stats: &TargetStats) {
        self.rows.push(TargetRow {
            label: label.into(),
            bias: stats.bias,
            crmsd: stats.crmsd,
            rmsd: stats.rmsd,
        });
    }
}

/// Table of Taylor statistics: the reference first, then one row per model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaylorReport {
    pub title: String,
    pub reference: TaylorRow,
    pub rows: Vec<TaylorRow>,
}

impl TaylorReport {
    /// Creates a report whose reference row comes from `first`.
    pub fn new(title: impl Into<String>, reference_label: impl Into<String>, first: &TaylorStats) -> Self {
        Self {
            title: title.into(),
            reference: TaylorRow {
                label: reference_label.into(),
                sdev: first.sdev[0],
                crmsd: first.crmsd[0],
                ccoef: first.ccoef[0],
            },
            rows: Vec::new(),
        }
    }

    /// Appends the predicted entries of `stats` as a labelled row.
    pub fn push(&mut self, label: impl Into<String>, stats: &TaylorStats) {
        self.rows.push(TaylorRow {
            label: label.into(),
            sdev: stats.sdev[1],
            crmsd: stats.crmsd[1],
            ccoef: stats.ccoef[1],
        });
    }
}

/// Both statistics tables of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub target: TargetReport,
    pub taylor: TaylorReport,
}

/// Serialize a report to pretty-printed JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, MetricsError> {
    serde_json::to_string_pretty(report).map_err(|e| MetricsError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::target_statistics;
    use crate::taylor::taylor_statistics;

    const REF: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    const PRED: [f64; 4] = [2.0, 3.0, 5.0, 4.0];

    #[test]
    fn test_target_report_json() {
        let stats = target_statistics(&PRED, &REF, None, false).unwrap();
        let mut report = TargetReport::new("Expt. 01.0", StatsKind::Unnormalized);
        report.push("M1", &stats);

        let json = to_json(&report).unwrap();
        assert!(json.contains("\"title\": \"Expt. 01.0\""));
        assert!(json.contains("\"type\": \"unnormalized\""));
        assert!(json.contains("\"label\": \"M1\""));
        assert!(json.contains("\"bias\": 1.0"));
    }

    #[test]
    fn test_taylor_report_reference_row() {
        let stats = taylor_statistics(&PRED, &REF, None).unwrap();
        let mut report = TaylorReport::new("Expt. 01.0", "Observed", &stats);
        report.push("M1", &stats);
        report.push("M2", &stats);

        assert_eq!(report.reference.ccoef, 1.0);
        assert_eq!(report.reference.crmsd, 0.0);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].ccoef, stats.ccoef[1]);

        let json = to_json(&report).unwrap();
        assert!(json.contains("\"label\": \"Observed\""));
    }

    #[test]
    fn test_stats_report_has_both_tables() {
        let t = target_statistics(&PRED, &REF, None, true).unwrap();
        let s = taylor_statistics(&PRED, &REF, None).unwrap();
        let report = StatsReport {
            target: TargetReport::new("", t.kind),
            taylor: TaylorReport::new("", "Observed", &s),
        };
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"target\""));
        assert!(json.contains("\"taylor\""));
        assert!(json.contains("\"normalized\""));
    }
}
