//! Visual style parameters suggested from a record's physical quantities.

use crate::config::VisualConfig;
use crate::core::domain::{CanonicalRecord, Palette, SizeClass, Texture, VisualParams};

/// Bucket the equilibrium temperature into a discrete palette.
///
/// Missing temperature falls back to the neutral palette, never an error.
pub fn palette_for_teq(teq_k: Option<f64>) -> Palette {
    match teq_k {
        Some(teq) if teq >= 1500.0 => Palette::HotGrayRed,
        Some(teq) if teq >= 800.0 => Palette::WarmGray,
        Some(teq) if teq >= 250.0 => Palette::BlueWhite,
        Some(_) => Palette::IceWhiteBlue,
        None => Palette::Neutral,
    }
}

/// Select a texture from the size class.
///
/// Gas-envelope classes get banded cloud decks, rocky planets broken clouds
/// or bare rock, and unclassified records stay smooth.
pub fn texture_for_class(size_class: Option<SizeClass>) -> Texture {
    match size_class {
        Some(class) if class.is_gaseous() => Texture::Banded,
        Some(_) => Texture::CloudsOrRocky,
        None => Texture::Smooth,
    }
}

/// Compute the discrete visual parameters for a record.
///
/// The day/night contrast is `tanh(insolation / 10)` — bounded to `[0, 1)`
/// for the non-negative insolations that occur in practice — with a neutral
/// 0.5 when insolation is missing. Tidal locking is an orbital-proximity
/// heuristic: period present, positive, and below the configured cutoff.
pub fn suggest_visual_params(record: &CanonicalRecord, config: &VisualConfig) -> VisualParams {
    let palette = palette_for_teq(record.teq_k);
    let texture = texture_for_class(record.size_class);

    let day_night_contrast = match record.insol_earth {
        Some(insol) => (insol / 10.0).tanh(),
        None => 0.5,
    };

    let tidally_locked_likely = record
        .period_days
        .is_some_and(|p| p > 0.0 && p < config.tidal_lock_max_period_days);

    VisualParams {
        palette,
        texture,
        day_night_contrast,
        tidally_locked_likely,
    }
}
