//! End-to-end tests over the harmonization pipeline: raw rows in, enriched
//! records out, mask-selected subsets onward.

use serde_json::json;

use exo_backend::core::domain::{Disposition, SizeClass, SourceKind};
use exo_backend::preprocessing::{CatalogPipeline, PipelineConfig};
use exo_backend::transformations::{apply_mask, filter_by_disposition, MaskPolicy};

#[test]
fn test_archive_batch_end_to_end() {
    let rows = vec![
        json!({
            "pl_name": "K2-18b",
            "hostname": "K2-18",
            "pl_rade": 2.6,
            "pl_orbper": 33.0,
            "st_mass": 0.5,
            "st_teff": 3457.0,
            "st_rad": 0.41,
            "disposition": "CONFIRMED"
        }),
        json!({
            "pl_name": "Fake-1b",
            "pl_rade": 0.9,
            "disposition": "FALSE POSITIVE"
        }),
    ];

    let result = CatalogPipeline::new().process(&rows);
    assert_eq!(result.source, SourceKind::NasaArchive);
    assert_eq!(result.total_records, 2);
    assert_eq!(result.confirmed_records, 1);

    let k2 = &result.records[0].canonical;
    assert_eq!(k2.planet_name.as_deref(), Some("K2-18b"));
    assert_eq!(k2.host_name.as_deref(), Some("K2-18"));
    assert_eq!(k2.size_class, Some(SizeClass::MiniNeptune));
    assert_eq!(k2.disposition, Disposition::Confirmed);

    // Semi-major axis comes from Kepler's third law; equilibrium temperature
    // and insolation follow from it in the same pass.
    let expected_sma = 0.5_f64.cbrt() * (33.0_f64 / 365.25).powf(2.0 / 3.0);
    assert!((k2.sma_au.unwrap() - expected_sma).abs() < 1e-12);
    assert!(k2.teq_k.is_some());
    assert!(k2.insol_earth.is_some());

    let fake = &result.records[1].canonical;
    assert_eq!(fake.size_class, Some(SizeClass::Rocky));
    assert_eq!(fake.disposition, Disposition::FalsePositive);
}

#[test]
fn test_tess_batch_derives_radius_from_depth() {
    let rows = vec![json!({
        "toi": 100.01,
        "pl_trandep": 1000.0,
        "st_rad": 1.0,
        "tfopwg_disp": "PC"
    })];

    let result = CatalogPipeline::new().process(&rows);
    assert_eq!(result.source, SourceKind::TessToi);

    let rec = &result.records[0].canonical;
    let radius = rec.radius_rearth.unwrap();
    assert!((radius - 3.45).abs() < 0.01);
    assert_eq!(rec.size_class, Some(SizeClass::MiniNeptune));
    assert_eq!(rec.disposition, Disposition::Confirmed);
}

#[test]
fn test_kepler_batch() {
    let rows = vec![json!({
        "kepoi_name": "K00087.01",
        "kepler_name": "Kepler-22b",
        "koi_period": 289.86,
        "koi_prad": 2.38,
        "koi_teq": 262.0,
        "koi_disposition": "CONFIRMED"
    })];

    let result = CatalogPipeline::new().process(&rows);
    assert_eq!(result.source, SourceKind::KeplerKoi);

    let rec = &result.records[0].canonical;
    assert_eq!(rec.planet_name.as_deref(), Some("Kepler-22b"));
    assert_eq!(rec.size_class, Some(SizeClass::SuperEarth));
    assert_eq!(rec.teq_k, Some(262.0));
}

#[test]
fn test_sparse_batch_degrades_gracefully() {
    let rows = vec![json!({"kepid": 12345})];

    let result = CatalogPipeline::new().process(&rows);
    let enriched = &result.records[0];

    assert!(enriched.canonical.is_fully_sparse());
    assert_eq!(enriched.canonical.size_class, None);
    assert_eq!(enriched.canonical.disposition, Disposition::Unknown);
    assert!(enriched.description.contains("type \"unknown\""));
    assert_eq!(enriched.description.matches("N/A").count(), 4);
    assert!(!enriched.description.contains("NaN"));
}

#[test]
fn test_descriptions_are_deterministic_across_runs() {
    let rows = vec![json!({
        "pl_name": "WASP-12b",
        "pl_rade": 20.0,
        "pl_eqt": 2580.0,
        "pl_orbper": 1.09,
        "pl_insol": 9000.0
    })];

    let pipeline = CatalogPipeline::new();
    let first = pipeline.process(&rows);
    let second = pipeline.process(&rows);
    assert_eq!(
        first.records[0].description,
        second.records[0].description
    );
    assert!(first.records[0].description.contains("tidal locking likely"));
    assert!(first.records[0].description.contains("hot gray red"));
}

#[test]
fn test_mask_selects_subset_for_enrichment() {
    let rows: Vec<_> = (0..6)
        .map(|i| json!({"pl_name": format!("P-{}", i), "pl_rade": 1.0 + i as f64}))
        .collect();

    let result = CatalogPipeline::new().process(&rows);
    let mask = [1u8, 0, 1, 1];

    let selected = apply_mask(&result.records, &mask, MaskPolicy::ExcludeMissing);
    assert_eq!(selected.len(), 3);
    assert_eq!(selected[0].canonical.planet_name.as_deref(), Some("P-0"));
    assert_eq!(selected[1].canonical.planet_name.as_deref(), Some("P-2"));
    assert_eq!(selected[2].canonical.planet_name.as_deref(), Some("P-3"));

    let permissive = apply_mask(&result.records, &mask, MaskPolicy::IncludeMissing);
    assert_eq!(permissive.len(), 5);
}

#[test]
fn test_disposition_filter_over_enriched_records() {
    let rows = vec![
        json!({"pl_name": "A", "disposition": "CONFIRMED"}),
        json!({"pl_name": "B", "disposition": "FP"}),
        json!({"pl_name": "C", "disposition": "CANDIDATE"}),
    ];

    let result = CatalogPipeline::new().process(&rows);
    let confirmed = filter_by_disposition(&result.records, Disposition::Confirmed);
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].canonical.planet_name.as_deref(), Some("A"));
}

#[test]
fn test_validation_report_travels_with_batch() {
    let rows = vec![
        json!({"pl_name": "X", "pl_orbper": -3.0}),
        json!({"pl_name": "Y"}),
    ];

    let result = CatalogPipeline::new().process(&rows);
    assert!(result.validation.is_valid);
    assert_eq!(result.validation.stats.total_records, 2);
    assert!(result
        .validation
        .warnings
        .iter()
        .any(|w| w.contains("non-positive orbital periods")));
}

#[test]
fn test_custom_albedo_changes_derived_teq_only() {
    let rows = vec![json!({
        "pl_name": "Z",
        "pl_orbper": 10.0,
        "st_mass": 1.0,
        "st_teff": 5777.0,
        "st_rad": 1.0
    })];

    let default_result = CatalogPipeline::new().process(&rows);

    let mut config = PipelineConfig::default();
    config.derivation.albedo = 0.0;
    let dark_result = CatalogPipeline::with_config(config).process(&rows);

    let default_teq = default_result.records[0].canonical.teq_k.unwrap();
    let dark_teq = dark_result.records[0].canonical.teq_k.unwrap();
    assert!(dark_teq > default_teq);

    // Insolation has no albedo dependence.
    assert_eq!(
        default_result.records[0].canonical.insol_earth,
        dark_result.records[0].canonical.insol_earth
    );
}
