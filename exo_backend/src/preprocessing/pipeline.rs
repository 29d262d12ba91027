//! Main harmonization pipeline: raw catalog rows in, enriched records out.
//!
//! The per-record chain (harmonize, derive, classify, describe) is pure and
//! side-effect-free, so records are independent of one another; output order
//! always matches input order.

use serde_json::Value;

use crate::config::{DerivationConfig, VisualConfig};
use crate::core::domain::{CanonicalRecord, Disposition, EnrichedRecord, SourceKind};
use crate::parsing::{harmonizer, source_detector};
use crate::preprocessing::derivation::derive_physical;
use crate::preprocessing::validator::{CatalogValidator, ValidationResult};
use crate::services::prompt::{build_description_with_params, negative_description};
use crate::services::visual::suggest_visual_params;

/// Configuration for the catalog pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub derivation: DerivationConfig,
    pub visual: VisualConfig,
    /// Attach a data-quality report to the result.
    pub validate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            derivation: DerivationConfig::default(),
            visual: VisualConfig::default(),
            validate: true,
        }
    }
}

/// Result of processing one batch of raw rows.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Enriched records in input order.
    pub records: Vec<EnrichedRecord>,
    /// Schema detected from the batch's first row.
    pub source: SourceKind,
    pub validation: ValidationResult,
    pub total_records: usize,
    pub confirmed_records: usize,
}

/// Catalog harmonization pipeline.
pub struct CatalogPipeline {
    config: PipelineConfig,
}

impl CatalogPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the full chain over one raw record of a known schema kind.
    pub fn process_record(&self, row: &Value, kind: SourceKind) -> EnrichedRecord {
        let harmonized = harmonizer::harmonize(row, kind);
        self.enrich(harmonized)
    }

    /// Derive, classify, and describe an already-harmonized record.
    pub fn enrich(&self, harmonized: CanonicalRecord) -> EnrichedRecord {
        let mut canonical = derive_physical(&harmonized, &self.config.derivation);
        canonical.classify();

        let visual = suggest_visual_params(&canonical, &self.config.visual);
        let description = build_description_with_params(&canonical, &visual);

        EnrichedRecord {
            canonical,
            visual,
            description,
            negative_description: negative_description().to_string(),
        }
    }

    /// Process a batch of raw rows.
    ///
    /// The schema is detected once from the first row; the batch is assumed
    /// homogeneous. Never fails: sparse or malformed rows degrade to records
    /// full of explicit misses.
    pub fn process(&self, rows: &[Value]) -> PipelineResult {
        let source = source_detector::detect_batch(rows);
        if source == SourceKind::Unknown && !rows.is_empty() {
            log::warn!(
                "batch of {} rows matched no known schema, using union mapping",
                rows.len()
            );
        }

        let records: Vec<EnrichedRecord> = rows
            .iter()
            .map(|row| self.process_record(row, source))
            .collect();

        let validation = if self.config.validate {
            let canonicals: Vec<CanonicalRecord> =
                records.iter().map(|r| r.canonical.clone()).collect();
            CatalogValidator::validate_records(&canonicals)
        } else {
            ValidationResult::new()
        };

        let total_records = records.len();
        let confirmed_records = records
            .iter()
            .filter(|r| r.canonical.disposition == Disposition::Confirmed)
            .count();

        log::debug!(
            "processed {} rows from {}: {} confirmed",
            total_records,
            source,
            confirmed_records
        );

        PipelineResult {
            records,
            source,
            validation,
            total_records,
            confirmed_records,
        }
    }
}

impl Default for CatalogPipeline {
    fn default() -> Self {
        Self::new()
    }
}
