use healthpro_core::classify::{classify, classify_number};
use healthpro_core::models::definition::{ClassificationRange, ClassificationSpec};
use serde_json::json;

fn range(min: Option<f64>, max: Option<f64>, label: &str) -> ClassificationRange {
    ClassificationRange {
        min,
        max,
        label: label.to_string(),
        color: format!("#{label}"),
    }
}

fn heart_rate() -> ClassificationSpec {
    ClassificationSpec {
        ranges: vec![
            range(None, Some(60.0), "Low"),
            range(Some(60.0), Some(100.0), "Normal"),
            range(Some(100.0), None, "High"),
        ],
    }
}

fn label(value: f64, spec: &ClassificationSpec) -> Option<String> {
    classify_number(value, spec).map(|c| c.label)
}

#[test]
fn open_ended_ranges_cover_both_tails() {
    let spec = heart_rate();
    assert_eq!(label(-1e9, &spec).as_deref(), Some("Low"));
    assert_eq!(label(72.0, &spec).as_deref(), Some("Normal"));
    assert_eq!(label(1e9, &spec).as_deref(), Some("High"));
}

#[test]
fn shared_boundary_goes_to_first_declared() {
    let spec = heart_rate();
    assert_eq!(label(60.0, &spec).as_deref(), Some("Low"));
    assert_eq!(label(100.0, &spec).as_deref(), Some("Normal"));
}

#[test]
fn overlapping_ranges_resolve_by_declaration_order() {
    let spec = ClassificationSpec {
        ranges: vec![range(Some(0.0), Some(50.0), "Wide"), range(Some(20.0), Some(30.0), "Narrow")],
    };
    assert_eq!(label(25.0, &spec).as_deref(), Some("Wide"));

    let reversed = ClassificationSpec {
        ranges: vec![range(Some(20.0), Some(30.0), "Narrow"), range(Some(0.0), Some(50.0), "Wide")],
    };
    assert_eq!(label(25.0, &reversed).as_deref(), Some("Narrow"));
}

#[test]
fn single_point_range_versus_adjacent_open_range() {
    let point_first = ClassificationSpec {
        ranges: vec![range(Some(5.0), Some(5.0), "Point"), range(Some(5.0), None, "Above")],
    };
    let open_first = ClassificationSpec {
        ranges: vec![range(Some(5.0), None, "Above"), range(Some(5.0), Some(5.0), "Point")],
    };
    assert_eq!(label(5.0, &point_first).as_deref(), Some("Point"));
    assert_eq!(label(5.0, &open_first).as_deref(), Some("Above"));
}

#[test]
fn gaps_yield_no_classification() {
    let spec = ClassificationSpec {
        ranges: vec![range(None, Some(10.0), "Low"), range(Some(20.0), None, "High")],
    };
    assert_eq!(label(15.0, &spec), None);
}

#[test]
fn soft_failures() {
    let spec = heart_rate();
    assert_eq!(classify(&json!(72), None), None);
    assert_eq!(classify(&json!("Normal"), Some(&spec)), None);
    assert_eq!(classify(&json!(null), Some(&spec)), None);
    let c = classify(&json!("120"), Some(&spec)).unwrap();
    assert_eq!(c.label, "High");
    assert_eq!(c.color, "#High");
}
