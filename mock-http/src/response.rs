//! Encoding of router responses as HTTP responses

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use mock_core::{MockResponse, ResponseBody};
use tracing::error;

/// Content type for every JSON body the mock sends
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// [`MockResponse`] wrapper that axum can send
#[derive(Debug, Clone)]
pub struct ApiReply(pub MockResponse);

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.0.body {
            ResponseBody::Json(value) => match serde_json::to_string(&value) {
                Ok(text) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], text).into_response(),
                Err(e) => {
                    error!(error = %e, "Failed to encode JSON response");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            },
            ResponseBody::Raw(text) => {
                (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], text).into_response()
            }
            ResponseBody::Empty => status.into_response(),
        }
    }
}
