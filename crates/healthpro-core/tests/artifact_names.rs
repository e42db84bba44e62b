use healthpro_core::artifact_names::{encode_session_id, is_safe_file_name, report_file_name};
use healthpro_core::models::artifact::NamingScheme;

#[test]
fn session_scheme_is_deterministic() {
    let a = report_file_name("session_001", NamingScheme::Session, 1);
    let b = report_file_name("session_001", NamingScheme::Session, 2);
    assert_eq!(a, "report_session_001.pdf");
    assert_eq!(a, b);
}

#[test]
fn timestamped_scheme_appends_millis() {
    assert_eq!(
        report_file_name("s-9", NamingScheme::Timestamped, 1_718_000_000_000),
        "report_s-9_1718000000000.pdf"
    );
}

#[test]
fn session_ids_are_escaped() {
    let name = report_file_name("../etc/passwd", NamingScheme::Session, 0);
    assert_eq!(name, "report_.2E.2E.2Fetc.2Fpasswd.pdf");
    assert!(is_safe_file_name(&name));

    assert_eq!(encode_session_id("session_001"), "session_001");
    assert_eq!(encode_session_id("a b"), "a.20b");
    assert_eq!(encode_session_id("é"), ".C3.A9");
}

#[test]
fn distinct_sessions_never_share_a_file_name() {
    let ids = ["patient.A", "patient_A", "patient A", "patient/A", "patient.2EA", "patient-A"];
    for scheme in [NamingScheme::Session, NamingScheme::Timestamped] {
        let mut names: Vec<String> = ids.iter().map(|id| report_file_name(id, scheme, 1_718_000_000_000)).collect();
        for name in &names {
            assert!(is_safe_file_name(name), "{name}");
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ids.len(), "{scheme:?}");
    }

    // trailing digits in the id cannot be confused with the timestamp
    assert_ne!(
        report_file_name("a_1", NamingScheme::Timestamped, 5),
        report_file_name("a", NamingScheme::Timestamped, 15)
    );
}

#[test]
fn safety_predicate() {
    assert!(is_safe_file_name("report_session_001.pdf"));
    assert!(is_safe_file_name("report_session_001_1718000000000.pdf"));
    assert!(!is_safe_file_name("report_.pdf"));
    assert!(!is_safe_file_name("summary_session_001.pdf"));
    assert!(!is_safe_file_name("report_session_001.html"));
    assert!(!is_safe_file_name("report_..pdf"));
    assert!(!is_safe_file_name("report_a/../../secret.pdf"));
    assert!(!is_safe_file_name("report_a\\b.pdf"));
}
