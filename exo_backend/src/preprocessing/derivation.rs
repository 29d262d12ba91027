//! Physical derivation of missing canonical quantities.
//!
//! Four closed-form estimators fill gaps left by harmonization. Each runs
//! only when its target is missing and all of its inputs are present, so a
//! value already reported by the source catalog is never overwritten and
//! re-running derivation on a complete record changes nothing.
//!
//! These are best-effort approximations for presentation, not a scientific
//! simulation.

use crate::config::DerivationConfig;
use crate::core::domain::CanonicalRecord;

/// Solar radius in astronomical units.
pub const RSUN_AU: f64 = 0.00465047;
/// Earth radii per solar radius.
pub const REARTH_PER_RSUN: f64 = 109.1;
/// Solar effective temperature in Kelvin, the insolation reference.
pub const TEFF_SUN_K: f64 = 5777.0;

/// Planet radius (Earth radii) from transit depth (ppm) and stellar radius
/// (solar radii): `R_p = R_star * sqrt(depth / 1e6) * 109.1`.
///
/// Requires a positive depth and stellar radius.
pub fn estimate_radius_from_depth(depth_ppm: f64, st_rad_rsun: f64) -> Option<f64> {
    if !depth_ppm.is_finite() || depth_ppm <= 0.0 || !st_rad_rsun.is_finite() || st_rad_rsun <= 0.0
    {
        return None;
    }
    let delta = depth_ppm / 1e6;
    Some(st_rad_rsun * delta.sqrt() * REARTH_PER_RSUN)
}

/// Semi-major axis (AU) from orbital period (days) and stellar mass (solar
/// masses) via Kepler's third law in solar units:
/// `a = M^(1/3) * (P / 365.25)^(2/3)`.
pub fn estimate_sma_from_period(period_days: f64, st_mass_msun: f64) -> Option<f64> {
    if !period_days.is_finite() || period_days <= 0.0 || !st_mass_msun.is_finite()
        || st_mass_msun <= 0.0
    {
        return None;
    }
    Some(st_mass_msun.cbrt() * (period_days / 365.25).powf(2.0 / 3.0))
}

/// Equilibrium temperature (K) from stellar effective temperature, stellar
/// radius, and orbital distance, under the standard radiative-balance
/// formula: `T_eq = T_eff * sqrt(R_star_AU / (2 a)) * (1 - A)^(1/4)`.
pub fn estimate_teq(st_teff_k: f64, st_rad_rsun: f64, sma_au: f64, albedo: f64) -> Option<f64> {
    if ![st_teff_k, st_rad_rsun, sma_au].iter().all(|v| v.is_finite())
        || sma_au <= 0.0
        || st_rad_rsun <= 0.0
    {
        return None;
    }
    let rstar_au = st_rad_rsun * RSUN_AU;
    Some(st_teff_k * (rstar_au / (2.0 * sma_au)).sqrt() * (1.0 - albedo).powf(0.25))
}

/// Insolation relative to Earth from the same three stellar/orbital inputs:
/// `S = (R_star_AU / a)^2 * (T_eff / 5777)^4`.
pub fn estimate_insolation(st_teff_k: f64, st_rad_rsun: f64, sma_au: f64) -> Option<f64> {
    if ![st_teff_k, st_rad_rsun, sma_au].iter().all(|v| v.is_finite())
        || sma_au <= 0.0
        || st_rad_rsun <= 0.0
    {
        return None;
    }
    let rstar_au = st_rad_rsun * RSUN_AU;
    Some((rstar_au / sma_au).powi(2) * (st_teff_k / TEFF_SUN_K).powi(4))
}

/// Fill missing physical quantities in a canonical record.
///
/// Estimators run in a fixed order — radius, semi-major axis, equilibrium
/// temperature, insolation — so a semi-major axis derived in this pass feeds
/// the two formulas that depend on it. Each estimator is independently
/// skippable; insufficient inputs leave the field missing. Never fails.
pub fn derive_physical(record: &CanonicalRecord, config: &DerivationConfig) -> CanonicalRecord {
    let mut out = record.clone();

    if out.radius_rearth.is_none() {
        if let (Some(depth), Some(st_rad)) = (out.depth_ppm, out.st_rad_rsun) {
            out.radius_rearth = estimate_radius_from_depth(depth, st_rad);
        }
    }

    if out.sma_au.is_none() {
        if let (Some(period), Some(st_mass)) = (out.period_days, out.st_mass_msun) {
            out.sma_au = estimate_sma_from_period(period, st_mass);
        }
    }

    if out.teq_k.is_none() {
        if let (Some(teff), Some(st_rad), Some(sma)) = (out.st_teff_k, out.st_rad_rsun, out.sma_au)
        {
            out.teq_k = estimate_teq(teff, st_rad, sma, config.albedo);
        }
    }

    if out.insol_earth.is_none() {
        if let (Some(teff), Some(st_rad), Some(sma)) = (out.st_teff_k, out.st_rad_rsun, out.sma_au)
        {
            out.insol_earth = estimate_insolation(teff, st_rad, sma);
        }
    }

    out
}
