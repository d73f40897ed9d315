//! Single-line API request logging
//!
//! Each `/api/` request is logged once it has been answered, with its
//! status, timing and a truncated summary of query and body fields.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use http_body_util::{BodyExt, Limited};
use mock_core::routes::is_api_path;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{info, warn};

use crate::server::MAX_BODY_BYTES;

/// Maximum length for parameter values before truncation
const MAX_PARAM_LENGTH: usize = 30;

const TRUNCATION_SUFFIX: &str = "...";

/// Logs `/api/` requests as
/// `GET /api/clinicDetail [200] [1 ms] id="test-clinic-1"`.
///
/// Bodies over [`MAX_BODY_BYTES`] are dropped and the request continues
/// with an empty body.
pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !is_api_path(&path) {
        return next.run(request).await;
    }

    let start_time = Instant::now();
    let method = request.method().clone();
    let query = request.uri().query().unwrap_or("").to_string();

    let (parts, body) = request.into_parts();
    let body_bytes = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(%method, %path, error = %e, "Request body unreadable, continuing with empty body");
            Default::default()
        }
    };

    let summary = summarize_request(&query, &body_bytes);
    let request = Request::from_parts(parts, Body::from(body_bytes));

    let response = next.run(request).await;
    let elapsed_ms = start_time.elapsed().as_millis();
    let status = response.status().as_u16();

    if summary.is_empty() {
        info!(target: "mock_http::access", "{method} {path} [{status}] [{elapsed_ms} ms]");
    } else {
        info!(target: "mock_http::access", "{method} {path} [{status}] [{elapsed_ms} ms] {summary}");
    }

    response
}

/// Query pairs first, then top-level fields of a JSON object body
fn summarize_request(query: &str, body: &[u8]) -> String {
    let mut fields = Map::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        fields.insert(key.to_string(), Value::String(value.to_string()));
    }

    if let Ok(Value::Object(body_fields)) = serde_json::from_slice::<Value>(body) {
        fields.extend(body_fields);
    }

    format_params_summary(&fields)
}

fn format_params_summary(params: &Map<String, Value>) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            if is_sensitive_parameter(key) {
                return Some(format!("{key}=\"[REDACTED]\""));
            }

            let formatted = format_parameter_value(value);
            if formatted.is_empty() {
                None
            } else {
                Some(format!("{key}=\"{formatted}\""))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_parameter_value(value: &Value) -> String {
    let value_str = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{...{} fields}}", obj.len()),
        Value::Null => "null".to_string(),
    };

    truncate_string(&value_str, MAX_PARAM_LENGTH)
}

/// Truncate to `max_length` characters including the suffix
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        return input.to_string();
    }

    let keep = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
    let truncated: String = input.chars().take(keep).collect();
    format!("{truncated}{TRUNCATION_SUFFIX}")
}

fn is_sensitive_parameter(key: &str) -> bool {
    const SENSITIVE_KEYS: [&str; 7] = [
        "password",
        "token",
        "secret",
        "auth",
        "credential",
        "api_key",
        "apikey",
    ];

    let key_lower = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|sensitive| key_lower.contains(sensitive))
}
