//! Deterministic description strings for enriched records.
//!
//! The description feeds an external image-generation service and doubles as
//! the human-readable summary, so it must be a pure function of the record:
//! same input, same string. Missing quantities render as "N/A", never as a
//! NaN or an error.

use crate::config::VisualConfig;
use crate::core::domain::{CanonicalRecord, Palette, Texture, VisualParams};
use crate::services::visual::suggest_visual_params;

/// Fixed exclusion string paired with every generated description.
const NEGATIVE_DESCRIPTION: &str = "no visible continents, no letters or text, no watermarks, \
     no rings unless specified, photorealistic astronomical style";

pub fn negative_description() -> &'static str {
    NEGATIVE_DESCRIPTION
}

fn fmt_quantity(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*} {}", decimals, v, unit),
        None => "N/A".to_string(),
    }
}

fn fmt_rounded(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v.round() as i64, unit),
        None => "N/A".to_string(),
    }
}

fn palette_hint(palette: Palette) -> Option<&'static str> {
    match palette {
        Palette::HotGrayRed => Some("dark gray tones with reddish hues along the day-side limb"),
        Palette::WarmGray => Some("a warm gray palette with scattered clouds"),
        Palette::BlueWhite => Some("a cyan-blue palette with white methane and water clouds"),
        Palette::IceWhiteBlue => Some("a very cold palette of whites and pale blues"),
        Palette::Neutral => None,
    }
}

fn texture_hint(texture: Texture) -> Option<&'static str> {
    match texture {
        Texture::Banded => Some("visible zonal bands and stratified cloud decks"),
        Texture::CloudsOrRocky => Some("broken cloud cover or a dark rocky surface"),
        Texture::Smooth => None,
    }
}

const TIDAL_LOCK_HINT: &str =
    "a bright day hemisphere and a dark night hemisphere (tidal locking likely)";

/// Render the description for a record with precomputed visual parameters.
pub fn build_description_with_params(record: &CanonicalRecord, visual: &VisualParams) -> String {
    let class = record
        .size_class
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut parts = vec![
        format!(
            "Render a close-up, realistic 3D exoplanet of type \"{}\".",
            class
        ),
        format!(
            "Radius ~ {}, semi-major axis {}, equilibrium temperature {}, insolation {}.",
            fmt_quantity(record.radius_rearth, 2, "Earth radii"),
            fmt_quantity(record.sma_au, 3, "AU"),
            fmt_rounded(record.teq_k, "K"),
            fmt_quantity(record.insol_earth, 2, "S_Earth"),
        ),
        format!(
            "Use a {} palette with {} texture; day-night contrast {:.2}.",
            visual.palette.slug().replace('-', " "),
            visual.texture.slug().replace('-', " "),
            visual.day_night_contrast,
        ),
    ];

    let mut hints: Vec<&str> = Vec::new();
    if let Some(hint) = palette_hint(visual.palette) {
        hints.push(hint);
    }
    if let Some(hint) = texture_hint(visual.texture) {
        hints.push(hint);
    }
    if visual.tidally_locked_likely {
        hints.push(TIDAL_LOCK_HINT);
    }
    if !hints.is_empty() {
        parts.push(format!("Suggested details: {}.", hints.join("; ")));
    }

    parts.join(" ")
}

/// Render the description for a record, computing visual parameters on the
/// fly. Deterministic for a given record and configuration.
pub fn build_description(record: &CanonicalRecord, config: &VisualConfig) -> String {
    let visual = suggest_visual_params(record, config);
    build_description_with_params(record, &visual)
}
