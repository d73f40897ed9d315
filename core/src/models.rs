use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Typed todo entry, used for the default list and by test builders.
///
/// Tasks carry no identifier; they are addressed by position in the list.
/// The store itself keeps saved entries as raw JSON, so entries that do not
/// fit this shape are still accepted. Fields beyond the known five land in
/// `extra` and serialize back unchanged.
///
/// # Examples
///
/// ```rust
/// use mock_core::models::{Task, TaskStatus};
///
/// let task = Task::new("開発", "APIモックの整備", TaskStatus::Open, "P1", "2025-09-22T09:00:00+09:00");
/// let json = serde_json::to_value(&task).unwrap();
/// assert_eq!(json["status"], "open");
/// assert_eq!(json["createdAt"], "2025-09-22T09:00:00+09:00");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub category: String,
    pub title: String,
    pub status: TaskStatus,
    /// Priority token such as `P1` or `P2`
    pub priority: String,
    /// ISO-8601 creation timestamp, stored as sent
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        status: TaskStatus,
        priority: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            status,
            priority: priority.into(),
            created_at: created_at.into(),
            extra: Map::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// Full clinic record returned by `/api/clinicDetail`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clinic {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub phone: String,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub updated_at: i64,
    pub schema_version: u32,
    pub schedule: ClinicSchedule,
    pub media: ClinicMedia,
    pub departments: Vec<String>,
    pub services: Vec<String>,
    pub tests: Vec<String>,
    /// Ids of the practice modes this clinic offers
    pub modes: Vec<String>,
}

impl Clinic {
    pub fn summary(&self) -> ClinicSummary {
        ClinicSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            schema_version: self.schema_version,
        }
    }
}

/// Row shape of `/api/listClinics`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClinicSchedule {
    pub weekly: Vec<ScheduleSlot>,
    pub closed_days: Vec<String>,
    pub note: Option<String>,
}

/// One opening window, times as `HH:MM`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSlot {
    pub day: String,
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClinicMedia {
    pub logo: Option<String>,
    pub images: Vec<MediaImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaImage {
    pub url: String,
    pub alt: String,
}

/// Acknowledgement record for `/api/registerClinic`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredClinic {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub schema_version: u32,
}

/// Canonical reference-data record (department, vaccination, checkup, test).
///
/// The server fills every field; when decoding a remote master list only
/// `type`, `category` and `name` are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterItem {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub canonical_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(rename = "sortGroup", default, skip_serializing_if = "Option::is_none")]
    pub sort_group: Option<String>,
    #[serde(rename = "sortOrder", default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<u32>,
}

impl MasterItem {
    /// Approved item with its composite key derived from type, category and name
    pub fn new(kind: &str, category: &str, name: &str) -> Self {
        Self {
            key: master_key(kind, category, name),
            kind: kind.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            canonical_name: Some(name.to_string()),
            status: Some("approved".to_string()),
            count: 0,
            sources: Vec::new(),
            sort_group: None,
            sort_order: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_sources(mut self, sources: &[&str]) -> Self {
        self.sources = sources.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_sort(mut self, group: &str, order: u32) -> Self {
        self.sort_group = Some(group.to_string());
        self.sort_order = Some(order);
        self
    }
}

/// Composite key `master:<type>:<category>|<name>`
pub fn master_key(kind: &str, category: &str, name: &str) -> String {
    format!("master:{kind}:{category}|{name}")
}

/// Body of `POST /api/updateMasterItem`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MasterItemUpdate {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub name: String,
    #[serde(rename = "sortGroup")]
    pub sort_group: String,
    #[serde(rename = "sortOrder")]
    pub sort_order: u32,
}

/// Practice-mode descriptor served by `/api/modes`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mode {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub order: u32,
    pub active: bool,
}

/// Generation settings served bare (no envelope) by `/api/settings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub model: String,
    pub prompt: String,
    pub prompt_exam: String,
    pub prompt_diagnosis: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_round_trips_unknown_fields() {
        let raw = json!({
            "category": "開発",
            "title": "並び順の確認",
            "status": "done",
            "priority": "P2",
            "createdAt": "2025-09-21T18:30:00+09:00",
            "assignee": "suzuki"
        });

        let task: Task = serde_json::from_value(raw.clone()).unwrap();
        assert!(task.is_done());
        assert_eq!(task.extra.get("assignee"), Some(&json!("suzuki")));
        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }

    #[test]
    fn test_master_key_format() {
        let item = MasterItem::new("vaccination", "任意接種", "インフルエンザ");
        assert_eq!(item.key, "master:vaccination:任意接種|インフルエンザ");
    }

    #[test]
    fn test_master_item_sort_fields_are_optional() {
        let item = MasterItem::new("test", "内科一般検査", "血液検査");
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("sortGroup").is_none());
        assert_eq!(value["type"], "test");

        let sorted = item.with_sort("検査系", 10);
        let value = serde_json::to_value(&sorted).unwrap();
        assert_eq!(value["sortGroup"], "検査系");
        assert_eq!(value["sortOrder"], 10);
    }

    #[test]
    fn test_master_item_decodes_sparse_remote_rows() {
        let item: MasterItem = serde_json::from_value(json!({
            "type": "department",
            "category": "診療科",
            "name": "内科"
        }))
        .unwrap();
        assert_eq!(item.name, "内科");
        assert!(item.key.is_empty());
        assert!(item.sources.is_empty());
    }

    #[test]
    fn test_clinic_summary_shape() {
        let clinic = Clinic {
            id: "c1".into(),
            name: "テスト".into(),
            address: "中野区".into(),
            postal_code: "164-0001".into(),
            phone: "03-0000-0000".into(),
            created_at: 1,
            updated_at: 2,
            schema_version: 1,
            schedule: ClinicSchedule::default(),
            media: ClinicMedia::default(),
            departments: vec![],
            services: vec![],
            tests: vec![],
            modes: vec![],
        };
        let value = serde_json::to_value(clinic.summary()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(value["postalCode"], "164-0001");
        assert_eq!(keys.len(), 7);
        assert!(value.get("phone").is_none());
    }
}
