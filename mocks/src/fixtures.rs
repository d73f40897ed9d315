//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - Task lists in mixed states
//! - Tasks carrying fields outside the known shape
//! - Department masters with and without gaps

use mock_core::{MasterItem, Task, TaskStatus, DEPARTMENT_NAMES};
use serde_json::json;

pub fn create_test_task() -> Task {
    Task::new(
        "開発",
        "テストタスク",
        TaskStatus::Open,
        "P2",
        "2025-01-01T09:00:00+09:00",
    )
}

/// `count` distinct tasks alternating open and done
pub fn create_test_tasks(count: usize) -> Vec<Task> {
    (1..=count)
        .map(|i| {
            let status = if i % 2 == 0 {
                TaskStatus::Done
            } else {
                TaskStatus::Open
            };
            Task::new(
                format!("カテゴリ{}", i % 3),
                format!("タスク {i}"),
                status,
                format!("P{}", i % 3 + 1),
                format!("2025-01-{:02}T09:00:00+09:00", i % 28 + 1),
            )
        })
        .collect()
}

/// Task with client-side fields the server must keep
pub fn create_task_with_extra_fields() -> Task {
    let mut task = create_test_task();
    task.extra.insert("id".to_string(), json!("t-100"));
    task.extra.insert("dueDate".to_string(), json!("2025-02-01"));
    task.extra.insert("tags".to_string(), json!(["billing", "urgent"]));
    task
}

/// Department master covering every department the sort plan names
pub fn create_department_master() -> Vec<MasterItem> {
    create_department_master_without(&[])
}

/// Department master with `missing` left out
pub fn create_department_master_without(missing: &[&str]) -> Vec<MasterItem> {
    DEPARTMENT_NAMES
        .iter()
        .filter(|name| !missing.contains(name))
        .map(|name| MasterItem::new("department", "診療科", name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_tasks_are_distinct() {
        let tasks = create_test_tasks(10);
        assert_eq!(tasks.len(), 10);
        assert_eq!(tasks.iter().filter(|t| t.is_done()).count(), 5);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.title, format!("タスク {}", i + 1));
        }
    }

    #[test]
    fn test_department_master_gaps() {
        assert_eq!(create_department_master().len(), DEPARTMENT_NAMES.len());
        let partial = create_department_master_without(&["眼科", "歯科"]);
        assert_eq!(partial.len(), DEPARTMENT_NAMES.len() - 2);
        assert!(partial.iter().all(|item| item.name != "眼科"));
    }
}
