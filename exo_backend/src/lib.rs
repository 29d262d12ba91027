//! # Exo Backend
//!
//! Harmonization and enrichment engine for heterogeneous exoplanet catalogs.
//!
//! Raw rows from three incompatible catalog schemas (NASA Exoplanet Archive,
//! TESS TOI, Kepler KOI) are reconciled into one canonical physical record,
//! missing quantities are filled with closed-form estimates, each record is
//! classified and rendered into a deterministic description, and derived
//! image-generation work is funneled through a single-lane, rate-limited
//! task queue.
//!
//! ## Architecture
//!
//! - [`core`]: Canonical domain models
//! - [`parsing`]: Schema detection and harmonization of raw rows
//! - [`preprocessing`]: Physical derivation, validation, and the batch pipeline
//! - [`transformations`]: Inclusion-mask filtering and record filters
//! - [`services`]: Visual parameters, descriptions, and external-service glue
//! - [`queue`]: Rate-limited single-worker task queue
//! - [`config`]: Tunable constants (albedo, tidal-lock cutoff, queue spacing)
//!
//! The per-record pipeline is pure and infallible: malformed or sparse input
//! degrades to explicitly missing fields, never to an error or a NaN.

pub mod config;
pub mod core;
pub mod parsing;
pub mod preprocessing;
pub mod queue;
pub mod services;
pub mod transformations;
