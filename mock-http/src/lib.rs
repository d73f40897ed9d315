//! HTTP transport for the NCD mock API
//!
//! Wraps a [`mock_core::MockRouter`] in an axum application: one fallback
//! handler, static file serving for non-API paths, permissive CORS headers
//! on every response and single-line request logging.
//!
//! # Usage
//!
//! ```no_run
//! use mock_core::{FixtureSet, MockRouter, Variant};
//! use mock_http::MockServer;
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = MockRouter::new(FixtureSet::for_variant(Variant::Standard));
//!     let server = MockServer::new(router, "web");
//!     server.serve("127.0.0.1:7000").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod request_logger;
pub mod response;
pub mod server;

pub use error::ServerError;
pub use response::{ApiReply, JSON_CONTENT_TYPE};
pub use server::{MockServer, MockServerState, MAX_BODY_BYTES};
