use healthpro_core::models::record::AssessmentRecord;
use healthpro_export::document::assemble_document;
use healthpro_export::render::{render_report_html, render_template};
use healthpro_export::styles::PageOptions;
use healthpro_registry::Registry;
use jiff::Zoned;
use serde_json::json;

fn now() -> Zoned {
    "2024-06-14T15:04:00+00:00[UTC]".parse().unwrap()
}

#[test]
fn wellness_report_html_carries_every_section() {
    let registry = Registry::builtin().unwrap();
    let definition = registry.lookup("as_well_03").unwrap();
    let record = AssessmentRecord::try_from(json!({
        "session_id": "s-42",
        "assessment_id": "as_well_03",
        "vitalsMap": {
            "wellness_score": 55,
            "vitals": { "heart_rate": 72, "bp_sys": 118, "bp_dia": 76 }
        },
        "exercises": [
            { "name": "Lunges", "analysisScore": 70, "tipsList": ["Keep torso upright"] }
        ]
    }))
    .unwrap();

    let doc = assemble_document(&record, definition, &now());
    let html = render_report_html(&doc, &PageOptions::default()).unwrap();

    assert!(html.contains("@page { size: A4; margin: 20mm 15mm 20mm 15mm; }"));
    assert!(html.contains("print-color-adjust: exact"));
    assert!(html.contains("Comprehensive Wellness Report"));
    assert!(html.contains("Overall Score: 55%"));
    assert!(html.contains(r#"style="color: #ef4444""#));
    assert!(html.contains("72 bpm"));
    // autoescape encodes the slash
    assert!(html.contains("118&#x2F;76 mmHg"));
    assert!(html.contains("Lunges"));
    assert!(html.contains("Keep torso upright"));
    assert!(html.contains("Reps: 0/0"));
    assert!(html.contains("No glucose data available"));
    assert!(html.contains("Generated on: Jun 14, 2024, 03:04 PM"));
    assert!(html.contains("HealthPro Analytics"));
}

#[test]
fn missing_headline_has_no_colour() {
    let registry = Registry::builtin().unwrap();
    let definition = registry.lookup("as_hr_02").unwrap();
    let record = AssessmentRecord::try_from(json!({ "session_id": "s1" })).unwrap();

    let doc = assemble_document(&record, definition, &now());
    let html = render_report_html(&doc, &PageOptions::default()).unwrap();
    assert!(html.contains("Overall Score: N/A"));
    assert!(!html.contains("score-badge\" style"));
}

#[test]
fn record_text_is_escaped() {
    let registry = Registry::builtin().unwrap();
    let definition = registry.lookup("as_hr_02").unwrap();
    let record = AssessmentRecord::try_from(json!({
        "session_id": "<script>alert(1)</script>",
        "accuracy": 80
    }))
    .unwrap();

    let doc = assemble_document(&record, definition, &now());
    let html = render_report_html(&doc, &PageOptions::default()).unwrap();
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn broken_template_is_parse_error() {
    let err = render_template("broken.html", "{% if %}", &json!({})).unwrap_err();
    assert!(matches!(err, healthpro_export::error::ExportError::TemplateParse(_)), "{err}");
}
