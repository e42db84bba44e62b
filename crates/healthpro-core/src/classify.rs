use serde_json::Value;

use crate::models::definition::{Classification, ClassificationSpec};
use crate::resolve::as_number;

/// Map a value onto the first matching band of `spec`.
///
/// Returns `None` when there is no spec, the value does not coerce to a
/// finite number, or no band contains it. Ranges are a priority list:
/// overlaps and shared boundaries go to whichever range is declared first.
pub fn classify(value: &Value, spec: Option<&ClassificationSpec>) -> Option<Classification> {
    let spec = spec?;
    let n = as_number(value)?;
    classify_number(n, spec)
}

pub fn classify_number(value: f64, spec: &ClassificationSpec) -> Option<Classification> {
    spec.ranges
        .iter()
        .find(|range| range.contains(value))
        .map(|range| Classification {
            label: range.label.clone(),
            color: range.color.clone(),
        })
}
