//! Batch-level transformations over enriched records.
//!
//! - [`filtering`]: Positional inclusion-mask filtering and record filters

pub mod filtering;

pub use filtering::{apply_mask, filter_by_disposition, filter_by_size_class, MaskPolicy};
