//! Domain models for harmonized exoplanet catalog records.
//!
//! This module provides the core data structures produced by the
//! harmonization and derivation stages: the canonical record shape that all
//! source catalogs are mapped into, the categorical size classes, the
//! disposition label, and the visual parameters consumed by the description
//! generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog schema a raw record batch originates from.
///
/// Detected once per batch from the key set of the first record; batches are
/// assumed homogeneous. `Unknown` is a valid outcome, not an error — the
/// harmonizer falls back to a best-effort union mapping for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// NASA Exoplanet Archive "Planetary Systems" table (`pl_name`, `st_mass`, ...).
    NasaArchive,
    /// TESS Objects of Interest table (`toi`, `pl_trandep`, ...).
    TessToi,
    /// Kepler Objects of Interest cumulative table (`koi_*`, `kepid`).
    KeplerKoi,
    /// No known marker keys present.
    Unknown,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::NasaArchive => "nasa_archive",
            SourceKind::TessToi => "tess_toi",
            SourceKind::KeplerKoi => "kepler_koi",
            SourceKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Categorical planet size class, ordered from smallest to largest.
///
/// Derived from the planet radius alone via fixed thresholds in Earth radii.
/// A missing radius yields no class at all (`None`), never a default.
///
/// # Examples
///
/// ```
/// use exo_backend::core::domain::SizeClass;
///
/// assert_eq!(SizeClass::from_radius(Some(1.0)), Some(SizeClass::Rocky));
/// assert_eq!(SizeClass::from_radius(Some(11.2)), Some(SizeClass::JupiterLike));
/// assert_eq!(SizeClass::from_radius(None), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Rocky,
    SuperEarth,
    MiniNeptune,
    SubJupiter,
    JupiterLike,
}

impl SizeClass {
    /// Classify a radius in Earth radii against the fixed threshold ladder.
    ///
    /// Thresholds: `<1.5` rocky, `<2.5` super-Earth, `<4.0` mini-Neptune,
    /// `<8.0` Neptune/sub-Jupiter, `>=8.0` Jupiter-like.
    pub fn from_radius(radius_rearth: Option<f64>) -> Option<SizeClass> {
        let r = radius_rearth.filter(|v| v.is_finite())?;
        let class = if r < 1.5 {
            SizeClass::Rocky
        } else if r < 2.5 {
            SizeClass::SuperEarth
        } else if r < 4.0 {
            SizeClass::MiniNeptune
        } else if r < 8.0 {
            SizeClass::SubJupiter
        } else {
            SizeClass::JupiterLike
        };
        Some(class)
    }

    /// Whether this class describes a gas-envelope-dominated planet.
    ///
    /// Controls the banded cloud texture in the visual parameters.
    pub fn is_gaseous(&self) -> bool {
        !matches!(self, SizeClass::Rocky)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizeClass::Rocky => "rocky/small super-Earth",
            SizeClass::SuperEarth => "super-Earth/mini-Neptune",
            SizeClass::MiniNeptune => "mini-Neptune",
            SizeClass::SubJupiter => "Neptune/sub-Jupiter",
            SizeClass::JupiterLike => "Jupiter-like",
        };
        write!(f, "{}", s)
    }
}

/// Binary disposition label derived from the raw catalog disposition string.
///
/// `Unknown` covers missing and unrecognized dispositions alike — a record is
/// never defaulted into a misleadingly specific label.
///
/// # Examples
///
/// ```
/// use exo_backend::core::domain::Disposition;
///
/// assert_eq!(Disposition::from_raw(Some("confirmed")), Disposition::Confirmed);
/// assert_eq!(Disposition::from_raw(Some("FP")), Disposition::FalsePositive);
/// assert_eq!(Disposition::from_raw(Some("CANDIDATE?")), Disposition::Unknown);
/// assert_eq!(Disposition::from_raw(None), Disposition::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Confirmed,
    FalsePositive,
    Unknown,
}

impl Disposition {
    /// Map a raw disposition string to the binary label, case-insensitively.
    ///
    /// Confirmed tokens: `CONFIRMED`, `CP`, `PC`. False-positive tokens:
    /// `FALSE POSITIVE`, `FP`. Everything else is `Unknown`.
    pub fn from_raw(label_raw: Option<&str>) -> Disposition {
        let Some(raw) = label_raw else {
            return Disposition::Unknown;
        };
        match raw.trim().to_uppercase().as_str() {
            "CONFIRMED" | "CP" | "PC" => Disposition::Confirmed,
            "FALSE POSITIVE" | "FP" => Disposition::FalsePositive,
            _ => Disposition::Unknown,
        }
    }

    /// Three-valued truth: `Some(true)` confirmed, `Some(false)` false
    /// positive, `None` unknown.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Disposition::Confirmed => Some(true),
            Disposition::FalsePositive => Some(false),
            Disposition::Unknown => None,
        }
    }
}

/// The canonical physical record every source schema is harmonized into.
///
/// Numeric fields are `Option<f64>` where `Some` is always a finite value.
/// The harmonizer normalizes unparseable and non-finite inputs to `None`, so
/// a NaN can never silently survive into derived output. `size_class` and
/// `disposition` are annotated by the classification stage; the record is
/// treated as immutable once all stages have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub planet_name: Option<String>,
    pub host_name: Option<String>,
    /// Orbital period in days.
    pub period_days: Option<f64>,
    /// Transit depth in parts per million.
    pub depth_ppm: Option<f64>,
    /// Planet radius in Earth radii.
    pub radius_rearth: Option<f64>,
    /// Semi-major axis in AU.
    pub sma_au: Option<f64>,
    /// Equilibrium temperature in Kelvin.
    pub teq_k: Option<f64>,
    /// Insolation relative to Earth.
    pub insol_earth: Option<f64>,
    /// Orbital eccentricity.
    pub ecc: Option<f64>,
    /// Stellar effective temperature in Kelvin.
    pub st_teff_k: Option<f64>,
    /// Stellar radius in solar radii.
    pub st_rad_rsun: Option<f64>,
    /// Stellar mass in solar masses.
    pub st_mass_msun: Option<f64>,
    /// Planet mass in Earth masses.
    pub mass_mearth: Option<f64>,
    /// Raw disposition string as found in the source catalog.
    pub label_raw: Option<String>,
    /// Size class annotated by classification; `None` means unclassified.
    pub size_class: Option<SizeClass>,
    /// Binary disposition label annotated by classification.
    pub disposition: Disposition,
}

impl CanonicalRecord {
    /// An all-missing record, the starting point for harmonization.
    pub fn empty() -> Self {
        Self {
            planet_name: None,
            host_name: None,
            period_days: None,
            depth_ppm: None,
            radius_rearth: None,
            sma_au: None,
            teq_k: None,
            insol_earth: None,
            ecc: None,
            st_teff_k: None,
            st_rad_rsun: None,
            st_mass_msun: None,
            mass_mearth: None,
            label_raw: None,
            size_class: None,
            disposition: Disposition::Unknown,
        }
    }

    /// Annotate the size class and disposition label in place.
    pub fn classify(&mut self) {
        self.size_class = SizeClass::from_radius(self.radius_rearth);
        self.disposition = Disposition::from_raw(self.label_raw.as_deref());
    }

    /// True when every physical quantity is missing.
    pub fn is_fully_sparse(&self) -> bool {
        [
            self.period_days,
            self.depth_ppm,
            self.radius_rearth,
            self.sma_au,
            self.teq_k,
            self.insol_earth,
            self.ecc,
            self.st_teff_k,
            self.st_rad_rsun,
            self.st_mass_msun,
            self.mass_mearth,
        ]
        .iter()
        .all(Option::is_none)
    }
}

/// Discrete color palette bucketed from the equilibrium temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    HotGrayRed,
    WarmGray,
    BlueWhite,
    IceWhiteBlue,
    Neutral,
}

impl Palette {
    /// Kebab-case slug used in descriptions and export payloads.
    pub fn slug(&self) -> &'static str {
        match self {
            Palette::HotGrayRed => "hot-gray-red",
            Palette::WarmGray => "warm-gray",
            Palette::BlueWhite => "blue-white",
            Palette::IceWhiteBlue => "ice-white-blue",
            Palette::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Surface/cloud texture selected from the size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Texture {
    Banded,
    CloudsOrRocky,
    Smooth,
}

impl Texture {
    pub fn slug(&self) -> &'static str {
        match self {
            Texture::Banded => "banded-clouds",
            Texture::CloudsOrRocky => "clouds-or-rocky",
            Texture::Smooth => "smooth",
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Discrete visual style parameters for a record.
///
/// A pure function of the canonical record — recomputable at any time and
/// never persisted as authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualParams {
    pub palette: Palette,
    pub texture: Texture,
    /// Day/night brightness contrast in `[0, 1)`.
    pub day_night_contrast: f64,
    /// Orbital-proximity heuristic, not a physical proof.
    pub tidally_locked_likely: bool,
}

/// A canonical record together with its generated descriptions.
///
/// This is the unit handed to presentation and to the persistence boundary;
/// it is not mutated further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub canonical: CanonicalRecord,
    pub visual: VisualParams,
    pub description: String,
    pub negative_description: String,
}
