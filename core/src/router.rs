//! Mock API dispatch
//!
//! [`MockRouter`] turns a transport-neutral [`MockRequest`] into either a
//! canned [`MockResponse`] or a hand-off to static file serving. It owns the
//! fixture set for its variant and the task list, which is the only state
//! any request can change.

use chrono::Utc;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{MockError, Result};
use crate::fixtures::{FixtureSet, EXPORT_PLACEHOLDER};
use crate::models::{Clinic, ClinicSummary, MasterItem, Mode, RegisteredClinic, Settings};
use crate::routes::{self, Endpoint, Method, Route, ROUTES};
use crate::todo_store::TodoStore;

/// Id handed out by `/api/registerClinic`
pub const REGISTERED_CLINIC_ID: &str = "new-clinic-id";

/// Name used when a registration carries none
pub const DEFAULT_CLINIC_NAME: &str = "新しい診療所";

/// Decoded inbound request
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    /// Path without the query string
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl MockRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Query value trimmed; blank counts as absent
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Pre-serialized JSON text sent as is
    Raw(&'static str),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Json(body),
        }
    }

    pub fn raw(body: &'static str) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Raw(body),
        }
    }

    pub fn empty() -> Self {
        Self {
            status: 200,
            body: ResponseBody::Empty,
        }
    }

    pub fn from_error(error: &MockError) -> Self {
        Self {
            status: error.status_code(),
            body: ResponseBody::Json(error.to_body()),
        }
    }

    /// JSON payload, if this response carries one
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Outcome of routing one request
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Respond(MockResponse),
    /// Not an API request; serve from the document root
    Static,
}

impl Dispatch {
    pub fn into_response(self) -> Option<MockResponse> {
        match self {
            Dispatch::Respond(response) => Some(response),
            Dispatch::Static => None,
        }
    }
}

/// Fixture-backed request router with the in-memory task list
#[derive(Debug)]
pub struct MockRouter {
    fixtures: FixtureSet,
    todos: TodoStore,
}

impl Default for MockRouter {
    fn default() -> Self {
        Self::new(FixtureSet::default())
    }
}

impl MockRouter {
    pub fn new(fixtures: FixtureSet) -> Self {
        let todos = TodoStore::new(fixtures.todos.iter().map(|task| json!(task)).collect());
        Self { fixtures, todos }
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    /// The endpoint table shared by every variant
    pub fn routes() -> &'static [Route] {
        ROUTES
    }

    pub fn dispatch(&self, request: &MockRequest) -> Dispatch {
        if request.method == Method::Options {
            return Dispatch::Respond(MockResponse::empty());
        }

        match routes::resolve(request.method, &request.path) {
            Some(endpoint) => {
                debug!(?endpoint, path = %request.path, "Dispatching API request");
                Dispatch::Respond(self.handle(endpoint, request))
            }
            None => self.fallback(request),
        }
    }

    fn handle(&self, endpoint: Endpoint, request: &MockRequest) -> MockResponse {
        match endpoint {
            Endpoint::ListClinics => MockResponse::ok(json!({
                "ok": true,
                "clinics": self.list_clinics()
            })),
            Endpoint::ClinicDetail => {
                match self.clinic_detail(request.param("id"), request.param("name")) {
                    Ok(clinic) => MockResponse::ok(json!({"ok": true, "clinic": clinic})),
                    Err(e) => MockResponse::from_error(&e),
                }
            }
            Endpoint::ListModes => MockResponse::ok(json!({
                "ok": true,
                "modes": self.modes()
            })),
            Endpoint::GetSettings => MockResponse::ok(json!(self.settings())),
            Endpoint::ListCategories => {
                let kind = request.query.get("type").map(String::as_str).unwrap_or("");
                MockResponse::ok(json!({
                    "ok": true,
                    "categories": self.list_categories(kind)
                }))
            }
            Endpoint::ListMaster => {
                let kind = request.query.get("type").map(String::as_str).unwrap_or("");
                MockResponse::ok(json!({
                    "ok": true,
                    "items": self.list_master(kind)
                }))
            }
            Endpoint::TodoList => todo_response(self.todo_list()),
            Endpoint::TodoSave => todo_response(self.todo_save(&request.body)),
            Endpoint::RegisterClinic => MockResponse::ok(json!({
                "ok": true,
                "clinic": self.register_clinic(&request.body)
            })),
            Endpoint::Export => MockResponse::raw(EXPORT_PLACEHOLDER),
        }
    }

    fn fallback(&self, request: &MockRequest) -> Dispatch {
        match request.method {
            Method::Post => {
                debug!(path = %request.path, "Acknowledging unrouted POST");
                Dispatch::Respond(MockResponse::ok(self.fixtures.post_ack.body()))
            }
            Method::Get | Method::Head if routes::is_api_path(&request.path) => {
                Dispatch::Respond(MockResponse::from_error(&MockError::NotImplemented))
            }
            Method::Get | Method::Head => Dispatch::Static,
            _ => Dispatch::Respond(MockResponse::from_error(&MockError::MethodNotAllowed)),
        }
    }

    /// Clinic summaries in fixture order
    pub fn list_clinics(&self) -> Vec<ClinicSummary> {
        self.fixtures.clinics.iter().map(Clinic::summary).collect()
    }

    /// Exact id match first, then the first clinic whose name equals `name`.
    ///
    /// The returned record is an owned copy of the fixture.
    pub fn clinic_detail(&self, id: Option<&str>, name: Option<&str>) -> Result<Clinic> {
        let by_id = id.and_then(|id| self.fixtures.clinics.iter().find(|c| c.id == id));
        let found = by_id.or_else(|| {
            name.and_then(|name| self.fixtures.clinics.iter().find(|c| c.name == name))
        });
        found.cloned().ok_or(MockError::ClinicNotFound)
    }

    pub fn list_categories(&self, kind: &str) -> Vec<String> {
        self.fixtures.categories(kind)
    }

    pub fn list_master(&self, kind: &str) -> Vec<MasterItem> {
        self.fixtures.master_items(kind)
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.fixtures.modes.clone()
    }

    pub fn settings(&self) -> Settings {
        self.fixtures.settings.clone()
    }

    pub fn todo_list(&self) -> Vec<Value> {
        self.todos.snapshot()
    }

    /// Replace the task list from a raw save body.
    ///
    /// Unreadable bodies act as `{}`. Whenever `todos` is an array the list
    /// becomes exactly its elements, in order and of any shape; otherwise the
    /// current list is kept. Returns the list as stored after the call.
    pub fn todo_save(&self, body: &[u8]) -> Vec<Value> {
        let payload = decode_body(body);
        match parse_todos(&payload) {
            Some(todos) => {
                debug!(count = todos.len(), "Replacing task list");
                self.todos.replace(todos)
            }
            None => self.todos.snapshot(),
        }
    }

    pub fn register_clinic(&self, body: &[u8]) -> RegisteredClinic {
        let payload = decode_body(body);
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CLINIC_NAME);

        RegisteredClinic {
            id: REGISTERED_CLINIC_ID.to_string(),
            name: name.to_string(),
            created_at: Utc::now().timestamp(),
            schema_version: 1,
        }
    }
}

fn todo_response(todos: Vec<Value>) -> MockResponse {
    MockResponse::ok(json!({
        "ok": true,
        "updatedAt": Utc::now().timestamp(),
        "todos": todos
    }))
}

/// Decode a request body as a JSON object, falling back to `{}`
fn decode_body(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => Value::Object(Map::new()),
        Err(e) => {
            if !body.is_empty() {
                warn!(error = %e, bytes = body.len(), "Treating unreadable request body as empty");
            }
            Value::Object(Map::new())
        }
    }
}

fn parse_todos(payload: &Value) -> Option<Vec<Value>> {
    payload.get("todos").and_then(Value::as_array).cloned()
}
