//! Service version probe
//!
//! Fetches a status page from a running service, extracts the version it
//! reports and checks it against an expectation, producing a monitoring
//! verdict (OK / WARNING / CRITICAL / UNKNOWN).
//!
//! ```text
//! ┌───────────┐   ┌──────┐   ┌──────────┐   ┌───────────┐
//! │ Transport │──▶│ Gate │──▶│  Parser  │──▶│  Checker  │──▶ Verdict
//! │  (fetch)  │   │(200?)│   │(json/tag)│   │ (compare) │
//! └───────────┘   └──────┘   └──────────┘   └───────────┘
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod probe;
pub mod report;
pub mod transport;
pub mod verdict;
pub mod version;
