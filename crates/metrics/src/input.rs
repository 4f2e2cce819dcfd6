//! Series inputs: raw values or field-keyed mappings.

use std::collections::BTreeMap;

use crate::error::MetricsError;
use crate::utils::check_arrays;

/// Named series sharing one record, e.g. `{"data": [...], "time": [...]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: BTreeMap<String, Vec<f64>>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field and returns the set.
    pub fn with_field(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.fields.insert(name.into(), values);
        self
    }

    /// Inserts (or replaces) a field.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.fields.insert(name.into(), values);
    }

    /// Returns the values of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Iterates over field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, Vec<f64>>> for FieldSet {
    fn from(fields: BTreeMap<String, Vec<f64>>) -> Self {
        Self { fields }
    }
}

/// Input accepted by the aggregate statistics.
#[derive(Debug, Clone, Copy)]
pub enum SeriesInput<'a> {
    /// A plain series.
    Values(&'a [f64]),
    /// A field set; the series is looked up by field name.
    Fields(&'a FieldSet),
}

impl<'a> From<&'a [f64]> for SeriesInput<'a> {
    fn from(values: &'a [f64]) -> Self {
        SeriesInput::Values(values)
    }
}

impl<'a> From<&'a Vec<f64>> for SeriesInput<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        SeriesInput::Values(values.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for SeriesInput<'a> {
    fn from(values: &'a [f64; N]) -> Self {
        SeriesInput::Values(values.as_slice())
    }
}

impl<'a> From<&'a FieldSet> for SeriesInput<'a> {
    fn from(fields: &'a FieldSet) -> Self {
        SeriesInput::Fields(fields)
    }
}

impl<'a> SeriesInput<'a> {
    /// Resolve to a slice, looking up `field` for field sets.
    fn resolve(self, field: Option<&str>, input: &'static str) -> Result<&'a [f64], MetricsError> {
        match self {
            SeriesInput::Values(values) => Ok(values),
            SeriesInput::Fields(set) => {
                let name = field
                    .filter(|f| !f.is_empty())
                    .ok_or(MetricsError::MissingFieldName { input })?;
                set.get(name).ok_or_else(|| MetricsError::UnknownField {
                    input,
                    field: name.to_string(),
                })
            }
        }
    }
}

/// Extract and validate the predicted/reference pair.
///
/// Resolves fields, then checks shapes and finiteness. The returned slices
/// are safe to hand to any metric.
pub fn error_check_stats<'a>(
    predicted: SeriesInput<'a>,
    reference: SeriesInput<'a>,
    field: Option<&str>,
) -> Result<(&'a [f64], &'a [f64]), MetricsError> {
    let p = predicted.resolve(field, "predicted")?;
    let r = reference.resolve(field, "reference")?;
    check_arrays(p, r)?;
    Ok((p, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldSet {
        FieldSet::new()
            .with_field("data", vec![1.0, 2.0, 3.0])
            .with_field("other", vec![0.0, 0.0, 1.0])
    }

    #[test]
    fn test_field_set_accessors() {
        let set = sample();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.get("data"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["data", "other"]);
    }

    #[test]
    fn test_resolve_values_ignores_field() {
        let values = [4.0, 5.0];
        let input = SeriesInput::from(&values);
        assert_eq!(input.resolve(Some("x"), "predicted").unwrap(), &[4.0, 5.0]);
    }

    #[test]
    fn test_resolve_fields() {
        let set = sample();
        let got = SeriesInput::from(&set).resolve(Some("other"), "reference").unwrap();
        assert_eq!(got, &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_resolve_missing_field_name() {
        let set = sample();
        let err = SeriesInput::from(&set).resolve(None, "predicted").unwrap_err();
        assert_eq!(err, MetricsError::MissingFieldName { input: "predicted" });

        let err = SeriesInput::from(&set).resolve(Some(""), "predicted").unwrap_err();
        assert_eq!(err, MetricsError::MissingFieldName { input: "predicted" });
    }

    #[test]
    fn test_resolve_unknown_field() {
        let set = sample();
        let err = SeriesInput::from(&set).resolve(Some("sst"), "reference").unwrap_err();
        assert!(matches!(err, MetricsError::UnknownField { input: "reference", .. }));
    }

    #[test]
    fn test_error_check_stats_mixed_inputs() {
        let set = sample();
        let values = vec![3.0, 2.0, 1.0];
        let (p, r) =
            error_check_stats(SeriesInput::from(&values), SeriesInput::from(&set), Some("data"))
                .unwrap();
        assert_eq!(p, &[3.0, 2.0, 1.0]);
        assert_eq!(r, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_error_check_stats_non_finite() {
        let p = [1.0, f64::INFINITY];
        let r = [1.0, 2.0];
        let err = error_check_stats(SeriesInput::from(&p), SeriesInput::from(&r), None).unwrap_err();
        assert_eq!(err, MetricsError::NonFiniteInput { input: "predicted" });
    }
}
