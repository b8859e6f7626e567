//! HTTP tests for the job request endpoints, driven through the actix test
//! service with real stores behind the pipeline.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::Value;

use common::{FormBuilder, TestHarness, TEST_BUCKET};
use jobsetup::db::request_repo;
use jobsetup::form::AttachmentRole;
use jobsetup::{configure, AppState};

async fn post_form(state: AppState, builder: FormBuilder) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let (content_type, body) = builder.multipart();
    let req = test::TestRequest::post()
        .uri("/api/job-request")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let json: Value = test::read_body_json(resp).await;
    (status, json)
}

#[actix_web::test]
async fn test_create_returns_id() {
    let harness = TestHarness::new();
    let (status, body) = post_form(harness.app_state(), FormBuilder::new()).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().expect("id in response");
    assert!(request_repo::find_by_id(&harness.db, id).unwrap().is_some());
    assert_eq!(harness.attachment_count(), 2);
    assert_eq!(harness.sent_notifications().len(), 1);
}

#[actix_web::test]
async fn test_undeclared_content_type_stored_as_null() {
    let harness = TestHarness::new();
    let (status, body) = post_form(harness.app_state(), FormBuilder::new()).await;
    assert_eq!(status, StatusCode::OK);

    let id = body["id"].as_str().unwrap();
    let rows = jobsetup::db::attachment_repo::find_by_request(&harness.db, id).unwrap();
    let proposal = rows
        .iter()
        .find(|r| r.file_label == "Proposal")
        .expect("proposal row");
    assert_eq!(proposal.content_type, None);

    let po = rows
        .iter()
        .find(|r| r.file_label == "Approved PO")
        .expect("po row");
    assert_eq!(po.content_type.as_deref(), Some("application/pdf"));
}

#[actix_web::test]
async fn test_missing_attachment_is_rejected() {
    let harness = TestHarness::new();
    let (status, body) = post_form(
        harness.app_state(),
        FormBuilder::new().without_file(AttachmentRole::Po),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required attachment: Approved PO.");
    assert!(body.get("details").is_none());
    assert_eq!(harness.request_count(), 0);
}

#[actix_web::test]
async fn test_upload_failure_details_do_not_name_the_request() {
    let harness = TestHarness::new();
    let bucket = harness.storage_root().join(TEST_BUCKET);
    std::fs::create_dir_all(&bucket).unwrap();
    std::fs::write(bucket.join("job-requests"), b"not a directory").unwrap();

    let (status, body) = post_form(harness.app_state(), FormBuilder::new()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Upload failed for Approved PO.");
    let details = body["details"].as_str().expect("details string");
    assert!(!details.contains("job-requests/"), "details leak a key: {}", details);
    assert!(
        !details.contains(&*harness.storage_root().to_string_lossy()),
        "details leak the storage root: {}",
        details
    );
    assert_eq!(harness.request_count(), 0);
    assert_eq!(harness.attachment_count(), 0);
}

#[actix_web::test]
async fn test_validation_errors_include_details() {
    let harness = TestHarness::new();
    let (status, body) = post_form(
        harness.app_state(),
        FormBuilder::new()
            .field("invoice_submission_method", "Portal")
            .field("portal_name", "   "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed.");
    let details = body["details"].as_array().expect("details array");
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "portal_name");
    assert_eq!(
        details[0]["message"],
        "Portal Name is required when Portal is selected."
    );
    assert_eq!(harness.request_count(), 0);
}

#[actix_web::test]
async fn test_repeated_and_unknown_parts() {
    let harness = TestHarness::new();
    let (status, body) = post_form(
        harness.app_state(),
        FormBuilder::new()
            .raw_part("job_no", "J-999")
            .raw_part("favourite_colour", "green"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap();
    let row = request_repo::find_by_id(&harness.db, id).unwrap().unwrap();
    assert_eq!(row.job_no, "J-100");
}

#[actix_web::test]
async fn test_oversized_attachment_is_rejected() {
    let harness = TestHarness::new();
    let state = harness.app_state().with_max_upload_bytes(8);
    let (status, body) = post_form(state, FormBuilder::new()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("too large"));
    assert_eq!(harness.request_count(), 0);
}

#[actix_web::test]
async fn test_non_multipart_body_is_rejected() {
    let harness = TestHarness::new();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.app_state()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/job-request")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"job_no":"J-1"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_client_error());
    assert_eq!(harness.request_count(), 0);
}

#[actix_web::test]
async fn test_options_lists_markets_and_defaults() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::get()
        .uri("/api/job-request/options")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let markets = body["markets"].as_array().expect("markets");
    assert_eq!(markets[0]["market"], "1 - Chemical");
    assert!(markets[0]["submarkets"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s == "Chemical Plant"));
    assert!(body["defaults"].get("job_no").is_some());
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
