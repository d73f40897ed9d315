//! Declarative endpoint table
//!
//! Every API endpoint the mock answers is one row of [`ROUTES`]. Lookups go
//! through [`resolve`]; anything without a row falls through to the
//! method-specific defaults in the router.

use std::fmt;

/// Prefix that marks a path as part of the mock API
pub const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Options,
    Other,
}

impl Method {
    /// Case-insensitive parse; anything unsupported becomes `Other`
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "OPTIONS" => Method::Options,
            _ => Method::Other,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Options => "OPTIONS",
            Method::Other => "OTHER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    /// Matches the prefix itself and anything that starts with it
    Prefix(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(expected) => path == *expected,
            PathPattern::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(path) => f.write_str(path),
            PathPattern::Prefix(prefix) => write!(f, "{prefix}*"),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Endpoint {
    ListClinics,
    ClinicDetail,
    ListModes,
    GetSettings,
    ListCategories,
    ListMaster,
    TodoList,
    TodoSave,
    RegisterClinic,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub endpoint: Endpoint,
}

const fn get(pattern: PathPattern, endpoint: Endpoint) -> Route {
    Route {
        method: Method::Get,
        pattern,
        endpoint,
    }
}

const fn post(pattern: PathPattern, endpoint: Endpoint) -> Route {
    Route {
        method: Method::Post,
        pattern,
        endpoint,
    }
}

/// Exact routes come before prefix routes so a prefix never shadows them.
pub static ROUTES: &[Route] = &[
    get(PathPattern::Exact("/api/listClinics"), Endpoint::ListClinics),
    get(PathPattern::Exact("/api/clinicDetail"), Endpoint::ClinicDetail),
    get(PathPattern::Exact("/api/modes"), Endpoint::ListModes),
    get(PathPattern::Exact("/api/settings"), Endpoint::GetSettings),
    get(PathPattern::Exact("/api/listCategories"), Endpoint::ListCategories),
    get(PathPattern::Exact("/api/listMaster"), Endpoint::ListMaster),
    get(PathPattern::Exact("/api/todo/list"), Endpoint::TodoList),
    post(PathPattern::Exact("/api/todo/save"), Endpoint::TodoSave),
    post(PathPattern::Exact("/api/registerClinic"), Endpoint::RegisterClinic),
    get(PathPattern::Prefix("/api/export"), Endpoint::Export),
];

/// Find the endpoint for a method and path. HEAD resolves like GET.
pub fn resolve(method: Method, path: &str) -> Option<Endpoint> {
    let method = match method {
        Method::Head => Method::Get,
        other => other,
    };
    ROUTES
        .iter()
        .find(|route| route.method == method && route.pattern.matches(path))
        .map(|route| route.endpoint)
}

pub fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}
