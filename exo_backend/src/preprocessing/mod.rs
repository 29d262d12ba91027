//! Derivation, validation, and the batch pipeline.

pub mod derivation;
pub mod pipeline;
pub mod validator;

pub use derivation::derive_physical;
pub use pipeline::{CatalogPipeline, PipelineConfig, PipelineResult};
pub use validator::{CatalogValidator, ValidationResult, ValidationStats};
