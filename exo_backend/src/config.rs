//! Tunable configuration for the harmonization pipeline and task queue.
//!
//! The estimation and visual heuristics carry a handful of constants with no
//! first-principles derivation (Bond albedo, tidal-lock period cutoff, queue
//! spacing). They are configuration rather than hard-coded physical law, with
//! defaults matching the values the catalogs were processed with.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for the physical derivation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Bond albedo assumed in the equilibrium-temperature estimate.
    pub albedo: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self { albedo: 0.3 }
    }
}

/// Parameters for the visual-parameter heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Orbital periods below this many days count as likely tidally locked.
    pub tidal_lock_max_period_days: f64,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            tidal_lock_max_period_days: 10.0,
        }
    }
}

/// Parameters for the rate-limited task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Minimum spacing between task starts, in milliseconds.
    pub min_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 25_000,
        }
    }
}

/// Root configuration for the crate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub derivation: DerivationConfig,
    pub visual: VisualConfig,
    pub queue: QueueConfig,
}

impl CoreConfig {
    /// Load configuration from a TOML file. Missing keys fall back to the
    /// documented defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text).context("Failed to parse config TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.derivation.albedo, 0.3);
        assert_eq!(cfg.visual.tidal_lock_max_period_days, 10.0);
        assert_eq!(cfg.queue.min_interval_ms, 25_000);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: CoreConfig = toml::from_str(
            r#"
            [derivation]
            albedo = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.derivation.albedo, 0.25);
        assert_eq!(cfg.visual.tidal_lock_max_period_days, 10.0);
        assert_eq!(cfg.queue.min_interval_ms, 25_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[queue]\nmin_interval_ms = 1000\n\n[visual]\ntidal_lock_max_period_days = 5.0"
        )
        .unwrap();

        let cfg = CoreConfig::load(file.path()).unwrap();
        assert_eq!(cfg.queue.min_interval_ms, 1000);
        assert_eq!(cfg.visual.tidal_lock_max_period_days, 5.0);
        assert_eq!(cfg.derivation.albedo, 0.3);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = CoreConfig::load(Path::new("/nonexistent/exo.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
