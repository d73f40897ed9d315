//! NCD Mock Server Library
//!
//! Configuration loading, telemetry and startup wiring for the
//! `ncd-mock-server` binary.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{check_document_root, create_router, create_server, initialize_app};
pub use telemetry::init_telemetry;
