use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for mock API operations
pub type Result<T> = std::result::Result<T, MockError>;

/// Failures the mock API surfaces to HTTP callers.
///
/// Every variant renders as the `{ok: false, error}` envelope the front-end
/// expects, paired with the status code from [`MockError::status_code`].
///
/// # Examples
///
/// ```rust
/// use mock_core::error::MockError;
///
/// let miss = MockError::ClinicNotFound;
/// assert!(miss.is_not_found());
/// assert_eq!(miss.status_code(), 404);
/// assert_eq!(miss.to_body()["error"], "clinic not found");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    /// No clinic fixture matched the requested id or name
    #[error("clinic not found")]
    ClinicNotFound,

    /// GET under `/api/` that no route answers
    #[error("Not implemented")]
    NotImplemented,

    /// HTTP method outside GET, POST, HEAD and OPTIONS
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Variant name that does not match any fixture set
    #[error("Unknown variant: {0}. Must be one of: minimal, standard, admin")]
    UnknownVariant(String),
}

impl MockError {
    /// Check if this error indicates a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, MockError::ClinicNotFound | MockError::NotImplemented)
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            MockError::ClinicNotFound => 404,
            MockError::NotImplemented => 404,
            MockError::MethodNotAllowed => 405,
            MockError::UnknownVariant(_) => 400,
        }
    }

    /// Render as the `{ok: false, error}` failure envelope
    pub fn to_body(&self) -> Value {
        json!({
            "ok": false,
            "error": self.to_string()
        })
    }
}

/// Failures talking to a remote master API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MasterApiError {
    /// Connection, TLS or request building failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with something other than 200
    #[error("API returned {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}
