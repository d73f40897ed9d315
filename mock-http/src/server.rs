//! HTTP front end for [`MockRouter`]
//!
//! There is a single fallback handler: every request is decoded into a
//! [`MockRequest`] and dispatched by the router. Requests the router hands
//! back as static are served from the document root.

use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use mock_core::{Dispatch, Method, MockRequest, MockRouter};
use std::{
    collections::HashMap,
    future::Future,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};
use tracing::{debug, info, warn};

use crate::{error::ServerError, request_logger::request_logging_middleware, response::ApiReply};

/// Largest request body read; anything bigger is treated as empty
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Shared state for the fallback handler
#[derive(Clone)]
pub struct MockServerState {
    pub router: Arc<MockRouter>,
    pub static_files: ServeDir,
}

/// Mock API server bound to one fixture variant and document root
pub struct MockServer {
    router: Arc<MockRouter>,
    document_root: PathBuf,
}

impl MockServer {
    pub fn new(router: MockRouter, document_root: impl Into<PathBuf>) -> Self {
        Self::with_shared_router(Arc::new(router), document_root)
    }

    /// Build on a router the caller keeps a handle to
    pub fn with_shared_router(router: Arc<MockRouter>, document_root: impl Into<PathBuf>) -> Self {
        Self {
            router,
            document_root: document_root.into(),
        }
    }

    pub fn router(&self) -> &Arc<MockRouter> {
        &self.router
    }

    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Serve on `addr` until the process is killed
    pub async fn serve(self, addr: &str) -> Result<(), ServerError> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Serve on `addr` until `shutdown` resolves, then drain open connections
    pub async fn serve_with_shutdown<F>(self, addr: &str, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr.parse().map_err(|e: std::net::AddrParseError| {
            ServerError::InvalidAddress {
                addr: addr.to_string(),
                reason: e.to_string(),
            }
        })?;

        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: socket_addr.to_string(),
                source,
            })?;

        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let variant = self.router.fixtures().variant;
        info!(
            %local_addr,
            %variant,
            document_root = %self.document_root.display(),
            "Mock server listening"
        );

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Mock server stopped");
        Ok(())
    }

    /// The complete axum application, CORS headers included
    pub fn into_router(self) -> Router {
        let state = MockServerState {
            static_files: ServeDir::new(&self.document_root),
            router: self.router,
        };

        Router::new()
            .fallback(dispatch_handler)
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(CORS_ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(CORS_ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(CORS_ALLOW_HEADERS),
            ))
            .with_state(state)
    }
}

/// Decode the query string. The first non-empty value of a repeated key
/// wins; blank values are dropped.
fn parse_query(uri: &Uri) -> HashMap<String, String> {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let mut query = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        if !value.is_empty() {
            query.entry(key).or_insert(value);
        }
    }
    query
}

async fn dispatch_handler(State(state): State<MockServerState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let query = parse_query(&parts.uri);

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            warn!(path = %parts.uri.path(), error = %e, "Dropping unreadable request body");
            Vec::new()
        }
    };

    let mock_request = MockRequest {
        method: Method::parse(parts.method.as_str()),
        path: parts.uri.path().to_string(),
        query,
        body,
    };

    match state.router.dispatch(&mock_request) {
        Dispatch::Respond(response) => ApiReply(response).into_response(),
        Dispatch::Static => {
            debug!(path = %mock_request.path, "Serving static file");
            let request = Request::from_parts(parts, Body::empty());
            match state.static_files.oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
    }
}
