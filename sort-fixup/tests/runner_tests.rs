//! Sort fixup runs against the mock MasterApi and a live mock server

use mock_core::{FixtureSet, MasterApiError, MockRouter, Variant};
use mock_http::MockServer;
use mocks::{
    create_department_master, create_department_master_without, test_master_api_contract,
    MockMasterApi,
};
use sort_fixup::{run, FixupError, HttpMasterApi, RunOptions, DEPARTMENT_SORT_PLAN};
use std::time::Duration;
use tempfile::TempDir;

fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn dry_run() -> RunOptions {
    RunOptions {
        dry_run: true,
        delay: Duration::ZERO,
    }
}

fn live() -> RunOptions {
    RunOptions {
        dry_run: false,
        delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_dry_run_previews_every_entry() {
    let api = MockMasterApi::new().with_items("department", create_department_master());
    let mut out = Vec::new();

    let summary = run(&api, DEPARTMENT_SORT_PLAN, &dry_run(), &mut out).await.unwrap();

    assert_eq!(summary.planned, 50);
    assert_eq!(summary.updated, 0);
    let lines = output_lines(&out);
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[0], "[dry-run] 01: 内科 -> group=内科系, order=100");
    assert_eq!(lines[49], "[dry-run] 50: リウマチ科 -> group=リウマチ・免疫系, order=1400");
    api.assert_not_called("update_master_item");
}

#[tokio::test]
async fn test_missing_department_aborts_before_updates() {
    let api = MockMasterApi::new()
        .with_items("department", create_department_master_without(&["眼科"]));
    let mut out = Vec::new();

    let error = run(&api, DEPARTMENT_SORT_PLAN, &dry_run(), &mut out)
        .await
        .unwrap_err();

    match error {
        FixupError::MissingDepartments(missing) => assert_eq!(missing, vec!["眼科"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.is_empty());
    assert_eq!(api.call_count("update_master_item"), 0);
}

#[tokio::test]
async fn test_updates_follow_plan() {
    let api = MockMasterApi::new().with_items("department", create_department_master());
    let mut out = Vec::new();

    let summary = run(&api, DEPARTMENT_SORT_PLAN, &live(), &mut out).await.unwrap();
    assert_eq!(summary.updated, 50);

    let updates = api.updates();
    for (update, entry) in updates.iter().zip(DEPARTMENT_SORT_PLAN) {
        assert_eq!(update.kind, "department");
        assert_eq!(update.category, "診療科");
        assert_eq!(update.name, entry.name);
        assert_eq!(update.sort_group, entry.group);
        assert_eq!(update.sort_order, entry.order);
    }

    let lines = output_lines(&out);
    assert_eq!(lines[0], "updated 01: 内科");
    assert_eq!(lines[9], "updated 10: 感染症内科");

    let eye = api
        .items("department")
        .into_iter()
        .find(|item| item.name == "眼科")
        .unwrap();
    assert_eq!(eye.sort_group.as_deref(), Some("眼科系"));
    assert_eq!(eye.sort_order, Some(900));
}

#[tokio::test]
async fn test_failed_update_stops_the_run() {
    let api = MockMasterApi::new().with_items("department", create_department_master());
    api.fail_update_at(2, 500);
    let mut out = Vec::new();

    let error = run(&api, DEPARTMENT_SORT_PLAN, &live(), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(error, FixupError::Api(MasterApiError::Status(500))));
    assert_eq!(api.call_count("update_master_item"), 3);
    assert_eq!(output_lines(&out), vec!["updated 01: 内科", "updated 02: 総合診療科"]);
}

#[tokio::test]
async fn test_list_failure_is_reported() {
    let api = MockMasterApi::new();
    api.inject_error(MasterApiError::Transport("connection reset".to_string()));
    let mut out = Vec::new();

    let error = run(&api, DEPARTMENT_SORT_PLAN, &dry_run(), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(error, FixupError::Api(MasterApiError::Transport(_))));
    assert_eq!(error.exit_code(), 1);
}

/// Serve the admin variant on an ephemeral port
async fn start_mock_server(root: &TempDir) -> (String, tokio::sync::oneshot::Sender<()>) {
    let router = MockRouter::new(FixtureSet::for_variant(Variant::Admin));
    let server = MockServer::new(router, root.path());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(server.serve_on(listener, async {
        let _ = stop_rx.await;
    }));

    (base, stop_tx)
}

#[tokio::test]
async fn test_end_to_end_against_mock_server() {
    let root = TempDir::new().unwrap();
    let (base, stop) = start_mock_server(&root).await;
    let api = HttpMasterApi::new(&base).unwrap();

    test_master_api_contract(&api, "department").await;

    let mut out = Vec::new();
    let summary = run(&api, DEPARTMENT_SORT_PLAN, &live(), &mut out).await.unwrap();
    assert_eq!(summary.updated, 50);
    assert_eq!(output_lines(&out).len(), 50);

    let _ = stop.send(());
}

#[tokio::test]
async fn test_non_200_from_http_master() {
    let root = TempDir::new().unwrap();
    let (base, stop) = start_mock_server(&root).await;
    let api = HttpMasterApi::new(&format!("{base}/missing")).unwrap();

    let mut out = Vec::new();
    let error = run(&api, DEPARTMENT_SORT_PLAN, &dry_run(), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(error, FixupError::Api(MasterApiError::Status(404))));
    assert!(out.is_empty());

    let _ = stop.send(());
}
