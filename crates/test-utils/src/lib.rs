//! Shared test utilities for the csv-plot workspace.
//!
//! This crate provides common testing infrastructure including:
//! - CSV fixtures covering the shapes the chart types expect
//! - Deterministic CSV generators
//! - Image signature checks for every output format
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, is_png};
//! ```

pub mod fixtures;
pub mod generators;
pub mod images;

// Re-export commonly used items at the crate root
pub use generators::*;
pub use images::*;
