//! Schema detection for raw catalog records.
//!
//! A raw record is a flat JSON object produced externally from an uploaded
//! CSV or spreadsheet. The detector inspects its key set for schema marker
//! keys, checked in a fixed priority order; the first schema with any marker
//! present wins. Absence of a marker key is not an error.

use serde_json::Value;

use crate::core::domain::SourceKind;

/// Marker keys per schema, in detection priority order.
const MARKERS: &[(SourceKind, &[&str])] = &[
    (SourceKind::NasaArchive, &["pl_name", "st_mass"]),
    (SourceKind::TessToi, &["toi", "pl_trandep"]),
    (SourceKind::KeplerKoi, &["koi_period", "koi_prad", "kepid"]),
];

/// Classify a single raw record by its key set.
///
/// Returns [`SourceKind::Unknown`] for `null`, non-object values, and empty
/// objects. Pure and total.
pub fn detect(record: &Value) -> SourceKind {
    let Some(map) = record.as_object() else {
        return SourceKind::Unknown;
    };
    if map.is_empty() {
        return SourceKind::Unknown;
    }
    for (kind, keys) in MARKERS {
        if keys.iter().any(|k| map.contains_key(*k)) {
            return *kind;
        }
    }
    SourceKind::Unknown
}

/// Classify a batch from its first record.
///
/// Batches are assumed homogeneous; an empty batch is `Unknown`.
pub fn detect_batch(records: &[Value]) -> SourceKind {
    records.first().map(detect).unwrap_or(SourceKind::Unknown)
}
