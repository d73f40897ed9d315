//! End-to-end dispatch scenarios against the standard fixture set

use mock_core::{
    Dispatch, FixtureSet, Method, MockRequest, MockResponse, MockRouter, Variant,
};
use serde_json::{json, Value};

fn standard_router() -> MockRouter {
    MockRouter::new(FixtureSet::for_variant(Variant::Standard))
}

fn respond(router: &MockRouter, request: MockRequest) -> MockResponse {
    match router.dispatch(&request) {
        Dispatch::Respond(response) => response,
        Dispatch::Static => panic!("{} {} fell through to static", request.method, request.path),
    }
}

fn json_of(response: &MockResponse) -> Value {
    response.json().cloned().expect("JSON body")
}

fn save(router: &MockRouter, body: &[u8]) -> MockResponse {
    respond(router, MockRequest::post("/api/todo/save", body.to_vec()))
}

fn list(router: &MockRouter) -> Value {
    json_of(&respond(router, MockRequest::get("/api/todo/list")))
}

#[test]
fn test_list_clinics_in_fixture_order() {
    let router = standard_router();
    let body = json_of(&respond(&router, MockRequest::get("/api/listClinics")));

    assert_eq!(body["ok"], true);
    let ids: Vec<&str> = body["clinics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["test-clinic-1", "test-clinic-2"]);

    let first = &body["clinics"][0];
    for key in ["id", "name", "address", "postalCode", "created_at", "updated_at", "schema_version"] {
        assert!(first.get(key).is_some(), "summary is missing {key}");
    }
    assert!(first.get("schedule").is_none());
}

#[test]
fn test_clinic_detail_hit() {
    let router = standard_router();
    let response = respond(
        &router,
        MockRequest::get("/api/clinicDetail").with_query("id", "test-clinic-1"),
    );

    assert_eq!(response.status, 200);
    let body = json_of(&response);
    assert_eq!(body["ok"], true);
    assert_eq!(body["clinic"]["id"], "test-clinic-1");
    assert_eq!(body["clinic"]["name"], "テスト診療所1");
}

#[test]
fn test_clinic_detail_miss() {
    let router = standard_router();
    let response = respond(
        &router,
        MockRequest::get("/api/clinicDetail").with_query("id", "does-not-exist"),
    );

    assert_eq!(response.status, 404);
    assert_eq!(json_of(&response), json!({"ok": false, "error": "clinic not found"}));
}

#[test]
fn test_clinic_detail_returns_stored_record_as_copy() {
    let router = standard_router();

    for clinic in router.fixtures().clinics.clone() {
        let mut returned = router.clinic_detail(Some(&clinic.id), None).unwrap();
        assert_eq!(returned, clinic);

        returned.name = "書き換え".to_string();
        returned.departments.clear();

        let again = router.clinic_detail(Some(&clinic.id), None).unwrap();
        assert_eq!(again, clinic);
    }
}

#[test]
fn test_clinic_detail_by_name_only() {
    let router = standard_router();
    let response = respond(
        &router,
        MockRequest::get("/api/clinicDetail").with_query("name", "サンプル医院"),
    );
    assert_eq!(json_of(&response)["clinic"]["id"], "test-clinic-2");
}

#[test]
fn test_vaccination_categories_literal() {
    let router = standard_router();
    let response = respond(
        &router,
        MockRequest::get("/api/listCategories").with_query("type", "vaccinationType"),
    );
    assert_eq!(response.status, 200);
    assert_eq!(
        json_of(&response),
        json!({"ok": true, "categories": ["小児定期接種", "任意接種"]})
    );
}

#[test]
fn test_unknown_category_token_is_parameterized() {
    let router = standard_router();
    let response = respond(
        &router,
        MockRequest::get("/api/listCategories").with_query("type", "bodySite"),
    );
    assert_eq!(
        json_of(&response)["categories"],
        json!(["bodySite分類1", "bodySite分類2", "bodySite分類3"])
    );
}

#[test]
fn test_list_master_composite_keys() {
    let router = standard_router();
    let body = json_of(&respond(
        &router,
        MockRequest::get("/api/listMaster").with_query("type", "vaccination"),
    ));
    let first = &body["items"][0];
    assert_eq!(first["key"], "master:vaccination:小児定期接種|BCG");

    let fallback = json_of(&respond(&router, MockRequest::get("/api/listMaster")));
    assert_eq!(fallback["items"][0]["type"], "test");
    assert_eq!(fallback["items"][0]["key"], "master:test:内科一般検査|血液検査");
}

#[test]
fn test_modes_and_settings() {
    let router = standard_router();

    let modes = json_of(&respond(&router, MockRequest::get("/api/modes")));
    assert_eq!(modes["ok"], true);
    for mode in modes["modes"].as_array().unwrap() {
        for key in ["id", "label", "icon", "color", "order", "active"] {
            assert!(mode.get(key).is_some(), "mode is missing {key}");
        }
    }

    let settings = json_of(&respond(&router, MockRequest::get("/api/settings")));
    assert_eq!(settings["model"], "gpt-4o-mini");
    assert!(settings.get("ok").is_none());
    assert!(settings.get("prompt_exam").is_some());
    assert!(settings.get("prompt_diagnosis").is_some());
}

#[test]
fn test_todo_list_starts_with_defaults() {
    let router = standard_router();
    let body = list(&router);

    assert_eq!(body["ok"], true);
    assert!(body["updatedAt"].as_i64().unwrap() > 1_600_000_000);
    assert_eq!(body["todos"].as_array().unwrap().len(), 2);
}

#[test]
fn test_save_then_list_returns_same_items_in_order() {
    let router = standard_router();
    let todos = json!([
        {"category": "A", "title": "first", "status": "open", "priority": "P1", "createdAt": "2025-01-01T00:00:00Z"},
        {"category": "B", "title": "second", "status": "done", "priority": "P3", "createdAt": "2025-01-02T00:00:00Z"},
        {"category": "A", "title": "third", "status": "open", "priority": "P2", "createdAt": "2025-01-03T00:00:00Z"}
    ]);
    let body = serde_json::to_vec(&json!({"todos": todos})).unwrap();

    let saved = save(&router, &body);
    assert_eq!(saved.status, 200);
    assert_eq!(json_of(&saved)["todos"], todos);
    assert_eq!(list(&router)["todos"], todos);
}

#[test]
fn test_save_without_list_keeps_state() {
    let router = standard_router();
    let before = list(&router)["todos"].clone();

    for body in [
        r#"{}"#,
        r#"{"todos": null}"#,
        r#"{"todos": "nope"}"#,
        r#"{"todos": {"title": "x"}}"#,
        r#"{"other": []}"#,
    ] {
        let response = save(&router, body.as_bytes());
        assert_eq!(response.status, 200);
        assert_eq!(json_of(&response)["todos"], before, "body {body} changed state");
    }
    assert_eq!(list(&router)["todos"], before);
}

#[test]
fn test_save_replaces_with_partial_entries() {
    let router = standard_router();
    let todos = json!([{"category": "x", "title": "y"}]);
    let body = serde_json::to_vec(&json!({"todos": todos})).unwrap();

    let saved = save(&router, &body);
    assert_eq!(json_of(&saved)["todos"], todos);
    assert_eq!(list(&router)["todos"], todos);
}

#[test]
fn test_save_keeps_unrecognized_status() {
    let router = standard_router();
    let todos = json!([{
        "category": "開発",
        "title": "レビュー待ち",
        "status": "doing",
        "priority": "P2",
        "createdAt": "2025-09-23T10:00:00+09:00"
    }]);
    save(&router, &serde_json::to_vec(&json!({"todos": todos})).unwrap());

    let listed = list(&router);
    assert_eq!(listed["todos"].as_array().unwrap().len(), 1);
    assert_eq!(listed["todos"][0]["status"], "doing");
}

#[test]
fn test_save_stores_non_object_elements_in_order() {
    let router = standard_router();
    let todos = json!([1, "two", null, [3], {"title": "five"}]);
    save(&router, &serde_json::to_vec(&json!({"todos": todos})).unwrap());

    assert_eq!(list(&router)["todos"], todos);
}

#[test]
fn test_unparseable_save_body_matches_empty_object() {
    let router = standard_router();
    let before = list(&router)["todos"].clone();

    let garbage = save(&router, &[0xc3, 0x28, 0xff, b'{']);
    let empty = save(&router, b"{}");

    assert_eq!(garbage.status, 200);
    assert_eq!(json_of(&garbage)["ok"], true);
    assert_eq!(json_of(&garbage)["todos"], json_of(&empty)["todos"]);
    assert_eq!(list(&router)["todos"], before);
}

#[test]
fn test_unknown_api_get_is_404() {
    let router = standard_router();
    let response = respond(&router, MockRequest::get("/api/listSymptoms"));
    assert_eq!(response.status, 404);
    assert_eq!(json_of(&response), json!({"ok": false, "error": "Not implemented"}));
}

#[test]
fn test_unknown_post_is_acknowledged_without_side_effects() {
    let router = standard_router();
    let before = list(&router)["todos"].clone();

    let response = respond(
        &router,
        MockRequest::post("/api/deleteClinic", r#"{"todos": []}"#),
    );
    assert_eq!(response.status, 200);
    assert_eq!(json_of(&response), json!({"ok": true}));
    assert_eq!(list(&router)["todos"], before);
}

#[test]
fn test_options_anywhere() {
    let router = standard_router();
    for path in ["/", "/api/listClinics", "/api/nope", "/admin/admin.html"] {
        let response = respond(&router, MockRequest::new(Method::Options, path));
        assert_eq!(response, MockResponse::empty());
    }
}

#[test]
fn test_variants_share_route_table() {
    for variant in Variant::ALL {
        let router = MockRouter::new(FixtureSet::for_variant(variant));
        let body = json_of(&respond(&router, MockRequest::get("/api/listClinics")));
        assert_eq!(body["ok"], true);
        assert_eq!(
            body["clinics"].as_array().unwrap().len(),
            router.fixtures().clinics.len()
        );
    }
}
