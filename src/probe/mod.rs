//! Probe layer
//!
//! - [`target`]: per-service settings (`ProbeTarget`) and the Solr preset
//! - [`gate`]: rejects non-200 responses before parsing
//! - [`check`]: the fetch → gate → parse → compare pipeline

pub mod check;
pub mod gate;
pub mod target;

pub use check::run_check;
pub use target::ProbeTarget;
