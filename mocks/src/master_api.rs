//! Mock implementation of the MasterApi trait
//!
//! Provides an in-memory master store with:
//! - Error injection for the next call
//! - Status failure on the n-th update
//! - Call and update history for verification

use async_trait::async_trait;
use mock_core::{MasterApi, MasterApiError, MasterItem, MasterItemUpdate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory [`MasterApi`] keyed by master type
#[derive(Clone, Default)]
pub struct MockMasterApi {
    items: Arc<Mutex<HashMap<String, Vec<MasterItem>>>>,
    updates: Arc<Mutex<Vec<MasterItemUpdate>>>,
    error_injection: Arc<Mutex<Option<MasterApiError>>>,
    update_failure: Arc<Mutex<Option<(usize, u16)>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockMasterApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate one master type
    pub fn with_items(self, kind: &str, items: Vec<MasterItem>) -> Self {
        self.items.lock().insert(kind.to_string(), items);
        self
    }

    /// `department` master holding the given names under 診療科
    pub fn with_departments(self, names: &[&str]) -> Self {
        let items = names
            .iter()
            .map(|name| MasterItem::new("department", "診療科", name))
            .collect();
        self.with_items("department", items)
    }

    /// Fail the next call, whichever it is
    pub fn inject_error(&self, error: MasterApiError) {
        *self.error_injection.lock() = Some(error);
    }

    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Answer the update with zero-based index `index` with `status`
    pub fn fail_update_at(&self, index: usize, status: u16) {
        *self.update_failure.lock() = Some((index, status));
    }

    /// Updates accepted so far, in call order
    pub fn updates(&self) -> Vec<MasterItemUpdate> {
        self.updates.lock().clone()
    }

    pub fn items(&self, kind: &str) -> Vec<MasterItem> {
        self.items.lock().get(kind).cloned().unwrap_or_default()
    }

    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.call_history
            .lock()
            .iter()
            .filter(|call| call.starts_with(method))
            .count()
    }

    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    fn check_error_injection(&self) -> Result<(), MasterApiError> {
        match self.error_injection.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record_call(&self, call: String) {
        self.call_history.lock().push(call);
    }
}

#[async_trait]
impl MasterApi for MockMasterApi {
    async fn list_master(&self, kind: &str) -> Result<Vec<MasterItem>, MasterApiError> {
        self.record_call(format!("list_master({kind})"));
        self.check_error_injection()?;
        Ok(self.items(kind))
    }

    async fn update_master_item(&self, update: &MasterItemUpdate) -> Result<(), MasterApiError> {
        self.record_call(format!("update_master_item({})", update.name));
        self.check_error_injection()?;

        let index = self.updates.lock().len();
        if let Some((fail_at, status)) = *self.update_failure.lock() {
            if fail_at == index {
                return Err(MasterApiError::Status(status));
            }
        }

        if let Some(items) = self.items.lock().get_mut(&update.kind) {
            for item in items
                .iter_mut()
                .filter(|item| item.category == update.category && item.name == update.name)
            {
                item.sort_group = Some(update.sort_group.clone());
                item.sort_order = Some(update.sort_order);
            }
        }

        self.updates.lock().push(update.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str) -> MasterItemUpdate {
        MasterItemUpdate {
            kind: "department".to_string(),
            category: "診療科".to_string(),
            name: name.to_string(),
            sort_group: "内科系".to_string(),
            sort_order: 100,
        }
    }

    #[tokio::test]
    async fn test_update_applies_sort_fields() {
        let api = MockMasterApi::new().with_departments(&["内科", "外科"]);
        api.update_master_item(&update("内科")).await.unwrap();

        let items = api.items("department");
        assert_eq!(items[0].sort_group.as_deref(), Some("内科系"));
        assert_eq!(items[0].sort_order, Some(100));
        assert_eq!(items[1].sort_order, None);
        assert_eq!(api.updates().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_update_at_index() {
        let api = MockMasterApi::new().with_departments(&["内科", "外科"]);
        api.fail_update_at(1, 500);

        assert!(api.update_master_item(&update("内科")).await.is_ok());
        assert_eq!(
            api.update_master_item(&update("外科")).await,
            Err(MasterApiError::Status(500))
        );
        assert_eq!(api.updates().len(), 1);
        assert_eq!(api.call_count("update_master_item"), 2);
    }
}
