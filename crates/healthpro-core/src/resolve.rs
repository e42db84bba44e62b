//! Dotted field path resolution over nested JSON records.

use serde_json::{Map, Value};

/// Resolve a dot-separated `path` against `root`.
///
/// Walks one key at a time. Returns `None` as soon as a key is missing, a
/// step lands on `null`, or a step tries to descend into a scalar. Numeric
/// segments index into arrays. There is no partial match: either the whole
/// chain resolves to a non-null value or the result is `None`.
pub fn resolve<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    if current.is_null() { None } else { Some(current) }
}

/// Coerce a JSON value to a finite number.
///
/// Numbers pass through; strings are accepted when their trimmed content
/// parses completely as a finite float. Everything else is `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Human-readable form of a resolved value.
///
/// Whole numbers print without a fractional part (`72`, not `72.0`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => display_number(f),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

pub fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
