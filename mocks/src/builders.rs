//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Task construction with sensible defaults
//! - MasterItem construction with sort metadata
//! - Raw request bodies for the save and register endpoints

use mock_core::{MasterItem, Task, TaskStatus};
use serde_json::{json, Value};

/// Builder for constructing Task instances in tests
pub struct TaskBuilder {
    task: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            task: Task::new(
                "開発",
                "テストタスク",
                TaskStatus::Open,
                "P2",
                "2025-01-01T09:00:00+09:00",
            ),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.task.category = category.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn done(self) -> Self {
        self.with_status(TaskStatus::Done)
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.task.priority = priority.into();
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.task.created_at = created_at.into();
        self
    }

    /// Field outside the known task shape, kept on save
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.task.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for MasterItem instances
pub struct MasterItemBuilder {
    kind: String,
    category: String,
    name: String,
    count: u32,
    sources: Vec<String>,
    sort: Option<(String, u32)>,
}

impl MasterItemBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            category: "分類".to_string(),
            name: "項目".to_string(),
            count: 0,
            sources: Vec::new(),
            sort: None,
        }
    }

    pub fn department(name: impl Into<String>) -> Self {
        Self::new("department").with_category("診療科").with_name(name)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_sort(mut self, group: impl Into<String>, order: u32) -> Self {
        self.sort = Some((group.into(), order));
        self
    }

    pub fn build(self) -> MasterItem {
        let mut item = MasterItem::new(&self.kind, &self.category, &self.name).with_count(self.count);
        item.sources = self.sources;
        if let Some((group, order)) = self.sort {
            item = item.with_sort(&group, order);
        }
        item
    }
}

/// `{"todos": [...]}` body for `/api/todo/save`
pub fn todo_save_body(todos: &[Task]) -> Vec<u8> {
    serde_json::to_vec(&json!({ "todos": todos })).unwrap_or_default()
}

/// `{"name": ...}` body for `/api/registerClinic`
pub fn register_body(name: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({ "name": name })).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = TaskBuilder::new()
            .with_title("請求処理")
            .with_priority("P1")
            .done()
            .with_extra("assignee", json!("suzuki"))
            .build();

        assert_eq!(task.title, "請求処理");
        assert!(task.is_done());
        assert_eq!(task.extra["assignee"], "suzuki");
    }

    #[test]
    fn test_master_item_builder() {
        let item = MasterItemBuilder::department("眼科")
            .with_count(3)
            .with_source("import")
            .with_sort("眼科系", 900)
            .build();

        assert_eq!(item.key, "master:department:診療科|眼科");
        assert_eq!(item.count, 3);
        assert_eq!(item.sources, vec!["import"]);
        assert_eq!(item.sort_order, Some(900));
    }
}
