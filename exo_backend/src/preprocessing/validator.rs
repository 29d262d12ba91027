//! Data-quality reporting for harmonized catalog batches.
//!
//! Validation is informational: the pipeline never rejects sparse or odd
//! records, but a report of what was missing or suspicious travels with the
//! batch so consumers can judge its quality. Errors make `is_valid` false;
//! warnings do not.

use serde::{Deserialize, Serialize};

use crate::core::domain::{CanonicalRecord, Disposition};

/// Validation outcome with categorized issues and summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed while validating a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_records: usize,
    pub confirmed: usize,
    pub false_positives: usize,
    pub unknown_disposition: usize,
    pub missing_radius: usize,
    pub missing_period: usize,
    pub unclassified: usize,
    pub fully_sparse: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Add a critical error and mark the result invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a non-critical warning.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator over harmonized (and optionally derived) records.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate a batch of canonical records.
    pub fn validate_records(records: &[CanonicalRecord]) -> ValidationResult {
        let mut result = ValidationResult::new();

        if records.is_empty() {
            result.add_warning("Batch contains no records".to_string());
            return result;
        }

        let mut nonpositive_periods = 0usize;
        let mut nonpositive_radii = 0usize;
        let mut nonpositive_depths = 0usize;
        let mut implausible_teq = 0usize;

        for rec in records {
            result.stats.total_records += 1;

            match rec.disposition {
                Disposition::Confirmed => result.stats.confirmed += 1,
                Disposition::FalsePositive => result.stats.false_positives += 1,
                Disposition::Unknown => result.stats.unknown_disposition += 1,
            }

            if rec.radius_rearth.is_none() {
                result.stats.missing_radius += 1;
            }
            if rec.period_days.is_none() {
                result.stats.missing_period += 1;
            }
            if rec.size_class.is_none() {
                result.stats.unclassified += 1;
            }
            if rec.is_fully_sparse() {
                result.stats.fully_sparse += 1;
            }

            if rec.period_days.is_some_and(|p| p <= 0.0) {
                nonpositive_periods += 1;
            }
            if rec.radius_rearth.is_some_and(|r| r <= 0.0) {
                nonpositive_radii += 1;
            }
            if rec.depth_ppm.is_some_and(|d| d <= 0.0) {
                nonpositive_depths += 1;
            }
            if rec.teq_k.is_some_and(|t| t > 10_000.0) {
                implausible_teq += 1;
            }
        }

        if nonpositive_periods > 0 {
            result.add_warning(format!(
                "{} records have non-positive orbital periods",
                nonpositive_periods
            ));
        }
        if nonpositive_radii > 0 {
            result.add_warning(format!(
                "{} records have non-positive radii",
                nonpositive_radii
            ));
        }
        if nonpositive_depths > 0 {
            result.add_warning(format!(
                "{} records have non-positive transit depths",
                nonpositive_depths
            ));
        }
        if implausible_teq > 0 {
            result.add_warning(format!(
                "{} records have equilibrium temperatures above 10000 K",
                implausible_teq
            ));
        }
        if result.stats.fully_sparse > 0 {
            result.add_warning(format!(
                "{} records carry no physical quantities at all",
                result.stats.fully_sparse
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(radius: Option<f64>, period: Option<f64>, label: Option<&str>) -> CanonicalRecord {
        let mut rec = CanonicalRecord::empty();
        rec.radius_rearth = radius;
        rec.period_days = period;
        rec.label_raw = label.map(String::from);
        rec.classify();
        rec
    }

    #[test]
    fn test_empty_batch_warns() {
        let result = CatalogValidator::validate_records(&[]);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.stats.total_records, 0);
    }

    #[test]
    fn test_stats_counts() {
        let records = vec![
            record_with(Some(1.0), Some(10.0), Some("CONFIRMED")),
            record_with(None, Some(5.0), Some("FP")),
            record_with(Some(3.0), None, Some("something else")),
            record_with(None, None, None),
        ];

        let result = CatalogValidator::validate_records(&records);
        assert!(result.is_valid);
        assert_eq!(result.stats.total_records, 4);
        assert_eq!(result.stats.confirmed, 1);
        assert_eq!(result.stats.false_positives, 1);
        assert_eq!(result.stats.unknown_disposition, 2);
        assert_eq!(result.stats.missing_radius, 2);
        assert_eq!(result.stats.missing_period, 2);
        assert_eq!(result.stats.unclassified, 2);
        assert_eq!(result.stats.fully_sparse, 1);
    }

    #[test]
    fn test_nonpositive_values_warn() {
        let mut rec = record_with(Some(-1.0), Some(0.0), None);
        rec.depth_ppm = Some(-10.0);

        let result = CatalogValidator::validate_records(&[rec]);
        assert!(result.is_valid);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("non-positive orbital periods")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("non-positive radii")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("non-positive transit depths")));
    }

    #[test]
    fn test_add_error_invalidates() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid);
        result.add_error("boom".to_string());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }
}
