//! Smoke client against a wiremock stand-in for the API.

use serde_json::json;
use smoketest::{MISSING_ADMIN_ID, PROBE_IP, SEEDED_TELEGRAM_ID, SmokeTester, UNKNOWN_IP};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREATED_ADMIN_ID: i64 = 7;

/// Mount a well-behaved API. `duplicate_admin_status` lets a test break one check.
async fn mount_api(server: &MockServer, duplicate_admin_status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/log-visit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ip": "unknown"})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admins"))
        .and(body_partial_json(json!({ "telegram_id": SEEDED_TELEGRAM_ID })))
        .respond_with(
            ResponseTemplate::new(duplicate_admin_status)
                .set_body_json(json!({"detail": "Admin with this Telegram ID already exists"})),
        )
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admins"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": CREATED_ADMIN_ID, "message": "Admin created successfully"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/visits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/block-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/block-ip"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "IP is already blocked"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blocked-ips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([PROBE_IP])))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/unblock-ip"))
        .and(body_partial_json(json!({ "ip": PROBE_IP })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/unblock-ip"))
        .and(body_partial_json(json!({ "ip": UNKNOWN_IP })))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "IP not found in blocked list"})),
        )
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/admins/{CREATED_ADMIN_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/admins/{MISSING_ADMIN_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Admin not found"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_all_checks_pass_against_conforming_api() {
    let server = MockServer::start().await;
    mount_api(&server, 400).await;

    let mut tester = SmokeTester::new(server.uri());
    let summary = tester.run_all().await;

    assert_eq!(summary.run, 13);
    assert!(summary.all_passed(), "{:?}", tester.outcomes());
}

#[tokio::test]
async fn test_unexpected_status_is_reported() {
    let server = MockServer::start().await;
    mount_api(&server, 200).await;

    let mut tester = SmokeTester::new(server.uri());
    let summary = tester.run_all().await;

    assert_eq!(summary.failed(), 1);
    let failed: Vec<&str> = tester
        .outcomes()
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.name)
        .collect();
    assert_eq!(failed, vec!["Create Duplicate Admin"]);
}

#[tokio::test]
async fn test_missing_admin_id_fails_delete_check() {
    let server = MockServer::start().await;
    // Admin creation answers 200 but without an id.
    Mock::given(method("POST"))
        .and(path("/api/admins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
        .with_priority(1)
        .mount(&server)
        .await;

    let mut tester = SmokeTester::new(server.uri());
    tester.run_all().await;

    let delete = tester
        .outcomes()
        .iter()
        .find(|o| o.name == "Delete Admin")
        .expect("delete check recorded");
    assert!(!delete.passed);
    assert!(delete.status.is_none());
}

#[tokio::test]
async fn test_unreachable_server_fails_every_check() {
    // Nothing listens on port 9 of localhost in a test sandbox.
    let mut tester = SmokeTester::new("http://127.0.0.1:9");
    let summary = tester.run_all().await;

    assert_eq!(summary.run, 13);
    assert_eq!(summary.passed, 0);
}
