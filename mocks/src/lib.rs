//! Mock implementations and test utilities for the NCD mock API
//!
//! This crate provides testing infrastructure including:
//! - An in-memory MasterApi with error injection
//! - Builders and fixtures for tasks and master items
//! - Envelope assertion helpers
//! - Property-based testing strategies
//! - Contract test helpers

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod master_api;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use master_api::MockMasterApi;
