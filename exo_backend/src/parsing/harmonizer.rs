//! Harmonization of source-specific catalog rows into the canonical record.
//!
//! Each known schema has a static mapping table (canonical field → ordered
//! raw keys) interpreted by one generic routine, so adding a catalog means
//! adding a table, not another branch. The `Unknown` kind uses a union table
//! that tries every known schema's keys in priority order for every field.
//!
//! Coercion never surfaces a failure to the caller: values that do not parse
//! to a finite number become missing.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::core::domain::{CanonicalRecord, SourceKind};

/// Canonical numeric fields addressable by the mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericField {
    PeriodDays,
    DepthPpm,
    RadiusRearth,
    SmaAu,
    TeqK,
    InsolEarth,
    Ecc,
    StTeffK,
    StRadRsun,
    StMassMsun,
    MassMearth,
}

/// Canonical string fields addressable by the mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringField {
    PlanetName,
    HostName,
    LabelRaw,
}

const NUMERIC_FIELDS: &[NumericField] = &[
    NumericField::PeriodDays,
    NumericField::DepthPpm,
    NumericField::RadiusRearth,
    NumericField::SmaAu,
    NumericField::TeqK,
    NumericField::InsolEarth,
    NumericField::Ecc,
    NumericField::StTeffK,
    NumericField::StRadRsun,
    NumericField::StMassMsun,
    NumericField::MassMearth,
];

const STRING_FIELDS: &[StringField] = &[
    StringField::PlanetName,
    StringField::HostName,
    StringField::LabelRaw,
];

/// Field-mapping table for one source schema.
///
/// Keys are listed in priority order; the first key present with a usable
/// value wins. Fields absent from the table stay missing.
struct SchemaMapping {
    numeric: &'static [(NumericField, &'static [&'static str])],
    strings: &'static [(StringField, &'static [&'static str])],
}

/// NASA Exoplanet Archive Planetary Systems table.
static NASA_ARCHIVE: SchemaMapping = SchemaMapping {
    numeric: &[
        (NumericField::PeriodDays, &["pl_orbper"]),
        (NumericField::RadiusRearth, &["pl_rade"]),
        (NumericField::SmaAu, &["pl_orbsmax"]),
        (NumericField::TeqK, &["pl_eqt"]),
        (NumericField::InsolEarth, &["pl_insol"]),
        (NumericField::Ecc, &["pl_orbeccen"]),
        (NumericField::StTeffK, &["st_teff"]),
        (NumericField::StRadRsun, &["st_rad"]),
        (NumericField::StMassMsun, &["st_mass"]),
        (NumericField::MassMearth, &["pl_bmasse"]),
    ],
    strings: &[
        (StringField::PlanetName, &["pl_name"]),
        (StringField::HostName, &["hostname"]),
        (StringField::LabelRaw, &["disposition"]),
    ],
};

/// TESS Objects of Interest table. No semi-major axis, eccentricity, stellar
/// mass, or planet mass columns.
static TESS_TOI: SchemaMapping = SchemaMapping {
    numeric: &[
        (NumericField::PeriodDays, &["pl_orbper"]),
        (NumericField::DepthPpm, &["pl_trandep"]),
        (NumericField::RadiusRearth, &["pl_rade"]),
        (NumericField::TeqK, &["pl_eqt"]),
        (NumericField::InsolEarth, &["pl_insol"]),
        (NumericField::StTeffK, &["st_teff"]),
        (NumericField::StRadRsun, &["st_rad"]),
    ],
    strings: &[
        (StringField::PlanetName, &["toi"]),
        (StringField::LabelRaw, &["tfopwg_disp"]),
    ],
};

/// Kepler Objects of Interest cumulative table.
static KEPLER_KOI: SchemaMapping = SchemaMapping {
    numeric: &[
        (NumericField::PeriodDays, &["koi_period"]),
        (NumericField::DepthPpm, &["koi_depth"]),
        (NumericField::RadiusRearth, &["koi_prad"]),
        (NumericField::TeqK, &["koi_teq"]),
        (NumericField::InsolEarth, &["koi_insol"]),
        (NumericField::StTeffK, &["koi_steff"]),
        (NumericField::StRadRsun, &["koi_srad"]),
    ],
    strings: &[
        (StringField::PlanetName, &["kepler_name", "kepoi_name"]),
        (StringField::LabelRaw, &["koi_disposition"]),
    ],
};

/// Best-effort union mapping for unknown/mixed batches, built by
/// concatenating the known schemas' key lists in detection priority order.
static UNION: Lazy<UnionMapping> = Lazy::new(|| {
    let schemas = [&NASA_ARCHIVE, &TESS_TOI, &KEPLER_KOI];

    let numeric = NUMERIC_FIELDS
        .iter()
        .map(|field| {
            let keys: Vec<&'static str> = schemas
                .iter()
                .flat_map(|s| s.numeric.iter())
                .filter(|(f, _)| f == field)
                .flat_map(|(_, keys)| keys.iter().copied())
                .collect();
            (*field, keys)
        })
        .collect();

    let strings = STRING_FIELDS
        .iter()
        .map(|field| {
            let keys: Vec<&'static str> = schemas
                .iter()
                .flat_map(|s| s.strings.iter())
                .filter(|(f, _)| f == field)
                .flat_map(|(_, keys)| keys.iter().copied())
                .collect();
            (*field, keys)
        })
        .collect();

    UnionMapping { numeric, strings }
});

struct UnionMapping {
    numeric: Vec<(NumericField, Vec<&'static str>)>,
    strings: Vec<(StringField, Vec<&'static str>)>,
}

/// Coerce a raw JSON value to a finite number, or missing.
///
/// Accepts numbers and numeric strings. NaN, infinities, empty strings, and
/// anything unparseable all normalize to `None` — a parse failure is never
/// propagated.
fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Coerce a raw JSON value to a non-empty string, or missing.
///
/// Bare numbers are formatted; TESS TOI identifiers arrive as numbers.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_numeric(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| record.get(*k).and_then(coerce_f64))
}

fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| record.get(*k).and_then(coerce_string))
}

fn set_numeric(out: &mut CanonicalRecord, field: NumericField, value: Option<f64>) {
    let slot = match field {
        NumericField::PeriodDays => &mut out.period_days,
        NumericField::DepthPpm => &mut out.depth_ppm,
        NumericField::RadiusRearth => &mut out.radius_rearth,
        NumericField::SmaAu => &mut out.sma_au,
        NumericField::TeqK => &mut out.teq_k,
        NumericField::InsolEarth => &mut out.insol_earth,
        NumericField::Ecc => &mut out.ecc,
        NumericField::StTeffK => &mut out.st_teff_k,
        NumericField::StRadRsun => &mut out.st_rad_rsun,
        NumericField::StMassMsun => &mut out.st_mass_msun,
        NumericField::MassMearth => &mut out.mass_mearth,
    };
    *slot = value;
}

fn set_string(out: &mut CanonicalRecord, field: StringField, value: Option<String>) {
    let slot = match field {
        StringField::PlanetName => &mut out.planet_name,
        StringField::HostName => &mut out.host_name,
        StringField::LabelRaw => &mut out.label_raw,
    };
    *slot = value;
}

fn mapping_for(kind: SourceKind) -> Option<&'static SchemaMapping> {
    match kind {
        SourceKind::NasaArchive => Some(&NASA_ARCHIVE),
        SourceKind::TessToi => Some(&TESS_TOI),
        SourceKind::KeplerKoi => Some(&KEPLER_KOI),
        SourceKind::Unknown => None,
    }
}

/// Map a raw record of the given schema kind into a canonical record.
///
/// Always returns a fully-shaped record: every canonical field is present,
/// explicitly missing where the source has no usable value. Side-effect-free.
pub fn harmonize(record: &Value, kind: SourceKind) -> CanonicalRecord {
    let mut out = CanonicalRecord::empty();

    match mapping_for(kind) {
        Some(mapping) => {
            for (field, keys) in mapping.numeric {
                set_numeric(&mut out, *field, first_numeric(record, keys));
            }
            for (field, keys) in mapping.strings {
                set_string(&mut out, *field, first_string(record, keys));
            }
        }
        None => {
            log::debug!("harmonizing record with unknown schema via union mapping");
            for (field, keys) in &UNION.numeric {
                set_numeric(&mut out, *field, first_numeric(record, keys));
            }
            for (field, keys) in &UNION.strings {
                set_string(&mut out, *field, first_string(record, keys));
            }
        }
    }

    out
}

/// Detect the schema of a single record and harmonize it in one step.
pub fn harmonize_detected(record: &Value) -> CanonicalRecord {
    harmonize(record, crate::parsing::source_detector::detect(record))
}
