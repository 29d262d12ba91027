//! Core domain models shared across the crate.

pub mod domain;
