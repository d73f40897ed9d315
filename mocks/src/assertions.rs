//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - `{ok: true}` and `{ok: false, error}` envelopes
//! - Task list equality with clear error messages

use mock_core::Task;
use serde_json::Value;

/// Assert a body is a success envelope
pub fn assert_ok_envelope(body: &Value) {
    assert_eq!(
        body.get("ok"),
        Some(&Value::Bool(true)),
        "Expected an ok envelope, got {body}"
    );
}

/// Assert a body is exactly `{ok: false, error: <message>}`
pub fn assert_error_envelope(body: &Value, message: &str) {
    assert_eq!(
        body.get("ok"),
        Some(&Value::Bool(false)),
        "Expected an error envelope, got {body}"
    );
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(message),
        "Error message doesn't match"
    );
    assert_eq!(
        body.as_object().map(|o| o.len()),
        Some(2),
        "Error envelope carries extra fields: {body}"
    );
}

/// Assert a todo response holds exactly `expected`, in order
pub fn assert_todos_equal(body: &Value, expected: &[Task]) {
    assert_ok_envelope(body);
    assert!(
        body.get("updatedAt").and_then(Value::as_i64).is_some(),
        "Todo response is missing updatedAt: {body}"
    );

    let actual: Vec<Task> = serde_json::from_value(body["todos"].clone())
        .unwrap_or_else(|e| panic!("todos is not a task list ({e}): {body}"));
    assert_eq!(
        actual.len(),
        expected.len(),
        "Task list lengths differ"
    );
    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(actual, expected, "Task {i} differs");
    }
}

/// Assert the titles of a task list, in order
pub fn assert_task_titles(tasks: &[Task], expected: &[&str]) {
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, expected, "Task titles don't match");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope() {
        assert_error_envelope(&json!({"ok": false, "error": "clinic not found"}), "clinic not found");
    }

    #[test]
    #[should_panic(expected = "extra fields")]
    fn test_error_envelope_rejects_extra_fields() {
        assert_error_envelope(
            &json!({"ok": false, "error": "clinic not found", "code": 404}),
            "clinic not found",
        );
    }

    #[test]
    #[should_panic(expected = "Expected an ok envelope")]
    fn test_ok_envelope_rejects_error() {
        assert_ok_envelope(&json!({"ok": false}));
    }
}
