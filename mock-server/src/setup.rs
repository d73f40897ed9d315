use anyhow::{Context, Result};
use mock_core::{FixtureSet, MockRouter};
use mock_http::MockServer;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;

/// Build the fixture-backed router for the configured variant
pub fn create_router(config: &Config) -> MockRouter {
    let variant = config.server.variant;
    info!(%variant, "Loading fixtures");

    let fixtures = FixtureSet::for_variant(variant);
    info!(
        clinics = fixtures.clinics.len(),
        todos = fixtures.todos.len(),
        "Fixtures loaded"
    );

    MockRouter::new(fixtures)
}

/// Create the HTTP server around a router
pub fn create_server(config: &Config, router: MockRouter) -> MockServer {
    info!("Creating mock server");
    MockServer::new(router, &config.server.document_root)
}

/// Warn when the document root cannot serve anything.
///
/// A missing root is not fatal; API routes keep working and static
/// requests answer 404.
pub fn check_document_root(path: &Path) -> Result<bool> {
    if !path.exists() {
        warn!(
            document_root = %path.display(),
            "Document root does not exist, static files will not be served"
        );
        return Ok(false);
    }

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read document root {}", path.display()))?;
    if !metadata.is_dir() {
        warn!(
            document_root = %path.display(),
            "Document root is not a directory, static files will not be served"
        );
        return Ok(false);
    }

    Ok(true)
}

/// Initialize the complete application
pub fn initialize_app(config: &Config) -> Result<MockServer> {
    info!("Initializing application");

    check_document_root(&config.server.document_root)
        .context("Failed to check document root")?;

    let router = create_router(config);
    let server = create_server(config, router);

    info!("Application initialized successfully");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_core::Variant;
    use tempfile::TempDir;

    #[test]
    fn test_create_router_uses_variant() {
        let mut config = Config::default();
        config.server.variant = Variant::Admin;

        let router = create_router(&config);
        assert_eq!(router.fixtures().variant, Variant::Admin);
        assert_eq!(router.fixtures().clinics[0].id, "test001");
    }

    #[test]
    fn test_check_document_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(check_document_root(temp_dir.path()).unwrap());

        let file = temp_dir.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();
        assert!(!check_document_root(&file).unwrap());

        assert!(!check_document_root(&temp_dir.path().join("missing")).unwrap());
    }

    #[test]
    fn test_initialize_app_with_missing_root() {
        let mut config = Config::default();
        config.server.document_root = "/nonexistent/web".into();

        let server = initialize_app(&config).unwrap();
        assert_eq!(server.document_root(), Path::new("/nonexistent/web"));
    }
}
