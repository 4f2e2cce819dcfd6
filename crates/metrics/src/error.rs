//! Error types for the skill-metrics crate.

/// Error type for all fallible operations in the skill-metrics crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// Predicted and reference series have different lengths.
    #[error(
        "predicted and reference field dimensions do not match: \
         shape(predicted) = ({predicted},), shape(reference) = ({reference},)"
    )]
    DimensionMismatch {
        /// Length of the predicted series.
        predicted: usize,
        /// Length of the reference series.
        reference: usize,
    },

    /// Two parallel statistic arrays have different lengths.
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

    /// An input series is empty.
    #[error("{input} is empty")]
    EmptyInput {
        /// Name of the empty input.
        input: &'static str,
    },

    /// An input series contains NaN or infinity.
    #[error("{input} field has non-finite values")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// A field-keyed input was given without a field name.
    #[error("field name not supplied for {input} field set")]
    MissingFieldName {
        /// Which side (predicted or reference) needed the field.
        input: &'static str,
    },

    /// The requested field is not present in the field set.
    #[error("field '{field}' is not in {input} field set")]
    UnknownField {
        /// Which side (predicted or reference) was searched.
        input: &'static str,
        /// The missing field name.
        field: String,
    },

    /// Values fall outside the domain a metric is defined on.
    #[error("{input} has values outside {domain}")]
    DomainViolation {
        /// Name of the offending input.
        input: &'static str,
        /// Human-readable description of the valid domain.
        domain: &'static str,
    },

    /// A series whose spread is used as a denominator is constant.
    #[error("{input} has zero variance")]
    ZeroVariance {
        /// Name of the constant input.
        input: &'static str,
    },

    /// A denominator other than a variance is zero.
    #[error("{quantity} is zero")]
    ZeroDenominator {
        /// Description of the vanishing quantity.
        quantity: &'static str,
    },

    /// A KGE component weight is outside `[0, 1]`.
    #[error("'{name}' must be between 0 and 1, got {value}")]
    InvalidWeight {
        /// Weight name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A comparison threshold is too small to be meaningful.
    #[error("threshold value must be positive, got {threshold}")]
    InvalidThreshold {
        /// The offending threshold.
        threshold: f64,
    },

    /// Taylor statistics violate `E'^2 = s^2 + s_r^2 - 2 s s_r R`.
    #[error(
        "incompatible Taylor statistics at indices {indices:?}: \
         CRMSD^2 must equal STD^2 + STD_ref^2 - 2*STD*STD_ref*COR"
    )]
    TaylorRelation {
        /// Indices whose relative difference exceeds the threshold.
        indices: Vec<usize>,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying serializer message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_dimension_mismatch_reports_both_shapes() {
        let e = MetricsError::DimensionMismatch {
            predicted: 5,
            reference: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("shape(predicted) = (5,)"));
        assert!(msg.contains("shape(reference) = (4,)"));
    }

    #[test]
    fn error_unknown_field() {
        let e = MetricsError::UnknownField {
            input: "predicted",
            field: "sst".to_string(),
        };
        assert_eq!(e.to_string(), "field 'sst' is not in predicted field set");
    }

    #[test]
    fn error_invalid_weight() {
        let e = MetricsError::InvalidWeight {
            name: "sr",
            value: 1.5,
        };
        assert_eq!(e.to_string(), "'sr' must be between 0 and 1, got 1.5");
    }

    #[test]
    fn error_taylor_relation_lists_indices() {
        let e = MetricsError::TaylorRelation {
            indices: vec![1, 3],
        };
        assert!(e.to_string().contains("[1, 3]"));
    }

    #[test]
    fn error_non_finite() {
        let e = MetricsError::NonFiniteInput { input: "reference" };
        assert_eq!(e.to_string(), "reference field has non-finite values");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<MetricsError>();
    }
}
