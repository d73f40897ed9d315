//! Mock API Core Library
//!
//! Domain models, canned fixtures and request dispatch for the local
//! development mock servers. The HTTP transport and the binaries depend on
//! the types defined here.
//!
//! # Architecture
//!
//! - [`models`] - Clinics, tasks, master items, modes and settings
//! - [`fixtures`] - Per-variant fixture sets and shared category/master tables
//! - [`routes`] - Declarative endpoint table
//! - [`router`] - [`MockRouter`], which maps a request to a canned response
//! - [`todo_store`] - Mutex-guarded task list
//! - [`master_api`] - Client trait for the master reference-data API
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```rust
//! use mock_core::{FixtureSet, MockRequest, MockRouter, Variant};
//!
//! let router = MockRouter::new(FixtureSet::for_variant(Variant::Standard));
//! let response = router
//!     .dispatch(&MockRequest::get("/api/listCategories").with_query("type", "vaccinationType"))
//!     .into_response()
//!     .unwrap();
//!
//! assert_eq!(response.status, 200);
//! assert_eq!(response.json().unwrap()["categories"][0], "小児定期接種");
//! ```

pub mod error;
pub mod fixtures;
pub mod master_api;
pub mod models;
pub mod router;
pub mod routes;
pub mod todo_store;

pub use error::{MasterApiError, MockError, Result};
pub use fixtures::{FixtureSet, PostAck, Variant, DEPARTMENT_NAMES, EXPORT_PLACEHOLDER};
pub use master_api::MasterApi;
pub use models::{
    master_key, Clinic, ClinicMedia, ClinicSchedule, ClinicSummary, MasterItem,
    MasterItemUpdate, MediaImage, Mode, RegisteredClinic, ScheduleSlot, Settings, Task,
    TaskStatus,
};
pub use router::{Dispatch, MockRequest, MockResponse, MockRouter, ResponseBody};
pub use routes::{Endpoint, Method, PathPattern, Route, ROUTES};
pub use todo_store::TodoStore;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "mock-core");
    }

    #[test]
    fn test_re_exports() {
        let status = TaskStatus::Done;
        assert_eq!(format!("{status}"), "done");

        let error = MockError::ClinicNotFound;
        assert!(error.is_not_found());
    }
}
