//! Contract test helpers for validating MasterApi implementations
//!
//! Any [`MasterApi`] (the in-memory mock, or the HTTP client pointed at a
//! running mock server) should pass these.

use mock_core::{models::master_key, MasterApi, MasterItemUpdate};

/// Run every contract check against one master type that is known to be non-empty
pub async fn test_master_api_contract<A: MasterApi>(api: &A, kind: &str) {
    test_list_contract(api, kind).await;
    test_update_contract(api, kind).await;
}

/// Listed items carry the requested type and a composite key
pub async fn test_list_contract<A: MasterApi>(api: &A, kind: &str) {
    let items = api
        .list_master(kind)
        .await
        .expect("list_master should succeed");

    assert!(!items.is_empty(), "Master '{kind}' should not be empty");
    for item in &items {
        assert_eq!(item.kind, kind, "Listed item has the wrong type");
        assert!(!item.name.is_empty(), "Listed item has no name");
        assert_eq!(
            item.key,
            master_key(&item.kind, &item.category, &item.name),
            "Listed item key is not master:<type>:<category>|<name>"
        );
    }
}

/// Updating a listed item is accepted
pub async fn test_update_contract<A: MasterApi>(api: &A, kind: &str) {
    let items = api
        .list_master(kind)
        .await
        .expect("list_master should succeed");
    let first = items.first().expect("Master should not be empty");

    let update = MasterItemUpdate {
        kind: first.kind.clone(),
        category: first.category.clone(),
        name: first.name.clone(),
        sort_group: "契約テスト".to_string(),
        sort_order: 1,
    };

    api.update_master_item(&update)
        .await
        .expect("update_master_item should succeed for a listed item");
}
