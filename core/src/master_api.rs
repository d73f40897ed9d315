use async_trait::async_trait;

use crate::error::MasterApiError;
use crate::models::{MasterItem, MasterItemUpdate};

/// Client side of the master reference-data API.
///
/// The mock server answers this contract locally; the sort-order tool talks
/// to it over HTTP. Implementations must be usable from any task.
#[async_trait]
pub trait MasterApi: Send + Sync {
    /// Fetch every master item of one type
    ///
    /// # Returns
    /// * `Ok(Vec<MasterItem>)` - Items in server order (may be empty)
    /// * `Err(MasterApiError::Status)` - If the API answers with a non-200 status
    /// * `Err(MasterApiError::Decode)` - If the body is not `{items: [...]}`
    async fn list_master(&self, kind: &str) -> Result<Vec<MasterItem>, MasterApiError>;

    /// Apply sort metadata to a single master item
    ///
    /// # Returns
    /// * `Ok(())` - The API answered 200
    /// * `Err(MasterApiError::Status)` - Any other status
    async fn update_master_item(&self, update: &MasterItemUpdate) -> Result<(), MasterApiError>;
}
