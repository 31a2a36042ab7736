//! Version normalization and comparison
//!
//! # Modules
//!
//! - [`normalized`]: `NormalizedVersion`, a totally ordered decomposition of a version string
//! - [`expected`]: `ExpectedSpec`, the configured acceptance rule and its textual syntax
//! - [`checker`]: compares an extracted version against an `ExpectedSpec`, producing a verdict
//! - [`error`]: Error types for normalization and expectation parsing

pub mod checker;
pub mod error;
pub mod expected;
pub mod normalized;

pub use checker::compare;
pub use expected::ExpectedSpec;
pub use normalized::NormalizedVersion;
