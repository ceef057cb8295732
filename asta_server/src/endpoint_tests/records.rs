use std::path::PathBuf;

use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use asta_engine::{db_types::InquiryKind, ledger::LedgerKind, traits::StorageError, RecordsApi};
use serde_json::json;

use super::{
    helpers::{get_request, inquiry, json, registration},
    mocks::{MockInquiryStore, MockLedger, MockRegistrationStore},
};
use crate::routes::{AboutInquiriesRoute, ContactMessagesRoute, DownloadLedgerRoute, StudentsRoute};

fn configure_students(db: MockRegistrationStore, ledger: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = RecordsApi::new(db, ledger);
        cfg.service(
            web::scope("/api")
                .service(StudentsRoute::<MockRegistrationStore, MockLedger>::new())
                .service(DownloadLedgerRoute::<MockRegistrationStore, MockLedger>::new()),
        )
        .app_data(web::Data::new(api));
    }
}

fn configure_inquiries(db: MockInquiryStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = RecordsApi::new(db, MockLedger::new());
        cfg.service(
            web::scope("/api")
                .service(ContactMessagesRoute::<MockInquiryStore, MockLedger>::new())
                .service(AboutInquiriesRoute::<MockInquiryStore, MockLedger>::new()),
        )
        .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn fetch_students() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_fetch_registrations()
        .times(1)
        .returning(|| Ok(vec![registration(2, "pay_B"), registration(1, "pay_A")]));
    let (status, body) = get_request("/api/students", configure_students(db, MockLedger::new())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let students = json(&body);
    assert_eq!(students.as_array().map(Vec::len), Some(2));
    assert_eq!(students[0]["id"], 2);
    assert_eq!(students[0]["payment_status"], "successful");
    assert_eq!(students[0]["amount"], "1499.00");
    assert_eq!(students[1]["payment_id"], "pay_A");
}

#[actix_web::test]
async fn fetch_students_database_error() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_fetch_registrations().times(1).returning(|| Err(StorageError::DatabaseError("no such table".into())));
    let (status, body) = get_request("/api/students", configure_students(db, MockLedger::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({"error": "Database error"}));
}

#[actix_web::test]
async fn fetch_inquiries() {
    let _ = env_logger::try_init().ok();
    let mut db = MockInquiryStore::new();
    db.expect_fetch_inquiries()
        .withf(|kind| *kind == InquiryKind::Contact)
        .times(1)
        .returning(|_| Ok(vec![inquiry(5, Some("9123456789"))]));
    let (status, body) = get_request("/api/contact-messages", configure_inquiries(db)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(json(&body)[0]["phone"], "9123456789");

    let mut db = MockInquiryStore::new();
    db.expect_fetch_inquiries().withf(|kind| *kind == InquiryKind::About).times(1).returning(|_| Ok(vec![]));
    let (status, body) = get_request("/api/about-inquiries", configure_inquiries(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!([]));
}

#[actix_web::test]
async fn download_unknown_ledger() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_ledger_path().never();
    let (status, body) =
        get_request("/api/download/passwords", configure_students(MockRegistrationStore::new(), ledger)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body), json!({"error": "File not found"}));
}

#[actix_web::test]
async fn download_ledger_before_first_write() {
    let _ = env_logger::try_init().ok();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xlsx");
    let mut ledger = MockLedger::new();
    ledger.expect_ledger_path().returning(move |_| path.clone());
    let (status, body) =
        get_request("/api/download/students", configure_students(MockRegistrationStore::new(), ledger)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body), json!({"error": "File not found"}));
}

#[actix_web::test]
async fn download_ledger() {
    let _ = env_logger::try_init().ok();
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("contact_messages.xlsx");
    std::fs::write(&path, b"PK\x03\x04 not really a workbook").unwrap();
    let mut ledger = MockLedger::new();
    ledger
        .expect_ledger_path()
        .withf(|kind| *kind == LedgerKind::ContactMessages)
        .returning(move |_| path.clone());
    let app = App::new().configure(configure_students(MockRegistrationStore::new(), ledger));
    let service = test::init_service(app).await;
    let res = test::call_service(&service, TestRequest::get().uri("/api/download/contact").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
    let disposition = headers.get(header::CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(disposition.starts_with("attachment"), "{disposition}");
    assert!(disposition.contains("contact_messages.xlsx"), "{disposition}");
    let body = test::read_body(res).await;
    assert_eq!(body.as_ref(), b"PK\x03\x04 not really a workbook");
}
