use serde_json::{json, Value};

use crate::core::domain::SourceKind;
use crate::parsing::source_detector::{detect, detect_batch};

#[test]
fn test_detect_null_and_empty() {
    assert_eq!(detect(&Value::Null), SourceKind::Unknown);
    assert_eq!(detect(&json!({})), SourceKind::Unknown);
    assert_eq!(detect(&json!("not an object")), SourceKind::Unknown);
    assert_eq!(detect(&json!(42)), SourceKind::Unknown);
}

#[test]
fn test_detect_nasa_archive_markers() {
    assert_eq!(detect(&json!({"pl_name": "K2-18b"})), SourceKind::NasaArchive);
    assert_eq!(detect(&json!({"st_mass": 0.5})), SourceKind::NasaArchive);
}

#[test]
fn test_detect_tess_markers() {
    assert_eq!(detect(&json!({"toi": 700.01})), SourceKind::TessToi);
    assert_eq!(detect(&json!({"pl_trandep": 1000})), SourceKind::TessToi);
}

#[test]
fn test_detect_kepler_markers() {
    assert_eq!(detect(&json!({"koi_period": 10.0})), SourceKind::KeplerKoi);
    assert_eq!(detect(&json!({"koi_prad": 1.2})), SourceKind::KeplerKoi);
    assert_eq!(detect(&json!({"kepid": 11446443})), SourceKind::KeplerKoi);
}

#[test]
fn test_detect_priority_order() {
    // NASA archive markers outrank TESS, which outrank Kepler.
    let ambiguous = json!({"pl_name": "X", "toi": 1.01, "koi_period": 3.0});
    assert_eq!(detect(&ambiguous), SourceKind::NasaArchive);

    let tess_vs_kepler = json!({"pl_trandep": 500, "kepid": 123});
    assert_eq!(detect(&tess_vs_kepler), SourceKind::TessToi);
}

#[test]
fn test_detect_marker_value_is_irrelevant() {
    // Detection is by key presence only, not value.
    assert_eq!(detect(&json!({"pl_name": null})), SourceKind::NasaArchive);
}

#[test]
fn test_detect_no_markers() {
    assert_eq!(
        detect(&json!({"ra": 120.0, "dec": -30.0})),
        SourceKind::Unknown
    );
}

#[test]
fn test_detect_batch_uses_first_record() {
    let rows = vec![json!({"toi": 1.01}), json!({"pl_name": "X"})];
    assert_eq!(detect_batch(&rows), SourceKind::TessToi);
    assert_eq!(detect_batch(&[]), SourceKind::Unknown);
}
