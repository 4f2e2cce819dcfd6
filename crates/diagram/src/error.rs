//! Error types for the skill-diagram crate.

use std::path::PathBuf;

use skill_metrics::MetricsError;

/// Error type for diagram layout, option handling and rendering.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// A statistics check failed, e.g. the Taylor relation.
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Parallel statistic arrays have different lengths.
    #[error("{left} has length {left_len} but {right} has length {right_len}")]
    LengthMismatch {
        /// Name of the first array.
        left: &'static str,
        /// Length of the first array.
        left_len: usize,
        /// Name of the second array.
        right: &'static str,
        /// Length of the second array.
        right_len: usize,
    },

    /// A statistic array is empty.
    #[error("{input} is empty")]
    EmptyInput {
        /// Name of the empty array.
        input: &'static str,
    },

    /// A statistic is NaN, infinite, or outside the range it may take.
    #[error("{input} has invalid value {value}")]
    InvalidData {
        /// Name of the offending array.
        input: &'static str,
        /// The offending value.
        value: f64,
    },

    /// An option has a value outside its valid range.
    #[error("invalid value for option '{option}': {reason}")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// A textual option value could not be parsed.
    #[error("unrecognized {kind}: '{value}'")]
    UnrecognizedValue {
        /// What was being parsed, e.g. "color" or "line style".
        kind: &'static str,
        /// The text that failed to parse.
        value: String,
    },

    /// Legend mode was requested without marker labels.
    #[error("no marker labels provided for the legend")]
    MissingLabels,

    /// The axis range collapses to zero.
    #[error("cannot lay out axes: {reason}")]
    DegenerateAxis {
        /// Description of the degenerate range.
        reason: String,
    },

    /// The plotting backend reported a failure.
    #[error("render error: {reason}")]
    Render {
        /// Backend message.
        reason: String,
    },

    /// Writing a rendered figure failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_wraps_metrics_transparently() {
        let inner = MetricsError::TaylorRelation { indices: vec![2] };
        let msg = inner.to_string();
        let e = DiagramError::from(inner);
        assert_eq!(e.to_string(), msg);
    }

    #[test]
    fn error_unrecognized_value() {
        let e = DiagramError::UnrecognizedValue {
            kind: "line style",
            value: "~~".to_string(),
        };
        assert_eq!(e.to_string(), "unrecognized line style: '~~'");
    }

    #[test]
    fn error_invalid_option() {
        let e = DiagramError::InvalidOption {
            option: "alpha",
            reason: "must lie in [0, 1], got 2".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid value for option 'alpha': must lie in [0, 1], got 2"
        );
    }

    #[test]
    fn error_write_names_path() {
        let e = DiagramError::Write {
            path: PathBuf::from("/tmp/out/taylor.svg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(e.to_string().contains("/tmp/out/taylor.svg"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DiagramError>();
    }
}
