//! Department sort-order fixup
//!
//! Pushes `sortGroup`/`sortOrder` for every department in
//! [`plan::DEPARTMENT_SORT_PLAN`] to a master API, one update call per entry.

pub mod client;
pub mod error;
pub mod plan;
pub mod runner;

pub use client::{HttpMasterApi, DEFAULT_BASE_URL, USER_AGENT};
pub use error::FixupError;
pub use plan::{PlanEntry, DEPARTMENT_SORT_PLAN};
pub use runner::{parse_delay, run, RunOptions, RunSummary};
