use actix_web::{http::StatusCode, web, web::ServiceConfig};
use asta_common::Secret;
use asta_engine::{
    helpers::calculate_payment_signature,
    ledger::LedgerKind,
    notifications::EmailTemplates,
    traits::{LedgerError, NotificationError, StorageError},
    RegistrationFlowApi,
};
use serde_json::json;

use super::{
    helpers::{json, post_request, registration},
    mocks::{MockLedger, MockMailer, MockRegistrationStore},
};
use crate::routes::VerifyPaymentRoute;

const KEY_SECRET: &str = "test_secret_key";
const ORDER_ID: &str = "order_IEIaMR65cu6nz3";
const PAYMENT_ID: &str = "pay_IH4NVgf4Dreq1l";

fn confirmation(signature: &str) -> String {
    json!({
        "razorpay_order_id": ORDER_ID,
        "razorpay_payment_id": PAYMENT_ID,
        "razorpay_signature": signature,
        "student_info": {
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "course": "Phonics",
            "amount": 1499
        }
    })
    .to_string()
}

fn valid_confirmation() -> String {
    let signature = calculate_payment_signature(KEY_SECRET, ORDER_ID, PAYMENT_ID).unwrap();
    confirmation(&signature)
}

fn configure(db: MockRegistrationStore, ledger: MockLedger, mailer: MockMailer) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let templates = EmailTemplates::new("ASTA Education Academy", "info@astaeducation.example");
        let api = RegistrationFlowApi::new(db, ledger, mailer, templates, Secret::new(KEY_SECRET.to_string()));
        cfg.service(VerifyPaymentRoute::<MockRegistrationStore, MockLedger, MockMailer>::new())
            .app_data(web::Data::new(api));
    }
}

/// Nothing may be touched when a confirmation is rejected.
fn untouched() -> (MockRegistrationStore, MockLedger, MockMailer) {
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration().never();
    let mut ledger = MockLedger::new();
    ledger.expect_append().never();
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();
    (db, ledger, mailer)
}

#[actix_web::test]
async fn verify_payment() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration()
        .withf(|r| r.payment_id == PAYMENT_ID && r.registrant.amount.paise() == 149_900)
        .times(1)
        .returning(|_| Ok(7));
    db.expect_fetch_registration().times(1).returning(|id| Ok(Some(registration(id, PAYMENT_ID))));
    db.expect_delete_registration().never();
    let mut ledger = MockLedger::new();
    ledger
        .expect_append()
        .withf(|kind, record| *kind == LedgerKind::Students && record.get("ID").is_some())
        .times(1)
        .returning(|_, _| Ok(()));
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .withf(|email| email.to == "asha@example.com" && email.bcc.as_deref() == Some("info@astaeducation.example"))
        .times(1)
        .returning(|_| Ok(()));
    let (status, body) = post_request("/verify-payment", &valid_confirmation(), configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(json(&body), json!({"status": "success", "message": "Payment successful and records updated"}));
}

#[actix_web::test]
async fn tampered_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut signature = calculate_payment_signature(KEY_SECRET, ORDER_ID, PAYMENT_ID).unwrap();
    let last = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., last);
    let (db, ledger, mailer) = untouched();
    let body = confirmation(&signature);
    let (status, body) = post_request("/verify-payment", &body, configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({"status": "failure", "message": "Invalid signature"}));
}

#[actix_web::test]
async fn malformed_confirmation_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({"razorpay_order_id": ORDER_ID, "razorpay_payment_id": PAYMENT_ID}).to_string();
    let (db, ledger, mailer) = untouched();
    let (status, body) = post_request("/verify-payment", &body, configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({"status": "failure", "message": "Invalid payment confirmation"}));
}

#[actix_web::test]
async fn insert_failure() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration()
        .times(1)
        .returning(|_| Err(StorageError::DatabaseError("database is locked".into())));
    db.expect_delete_registration().never();
    let (_, ledger, mailer) = untouched();
    let (status, body) = post_request("/verify-payment", &valid_confirmation(), configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({"status": "error", "message": "Database error"}));
}

#[actix_web::test]
async fn missing_row_is_deleted_again() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration().times(1).returning(|_| Ok(3));
    db.expect_fetch_registration().times(1).returning(|_| Ok(None));
    db.expect_delete_registration().withf(|id| *id == 3).times(1).returning(|_| Ok(false));
    let (_, ledger, mailer) = untouched();
    let (status, body) = post_request("/verify-payment", &valid_confirmation(), configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({"status": "error", "message": "Error fetching student details"}));
}

#[actix_web::test]
async fn ledger_failure_deletes_the_registration() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration().times(1).returning(|_| Ok(11));
    db.expect_fetch_registration().times(1).returning(|id| Ok(Some(registration(id, PAYMENT_ID))));
    db.expect_delete_registration().withf(|id| *id == 11).times(1).returning(|_| Ok(true));
    let mut ledger = MockLedger::new();
    ledger
        .expect_append()
        .times(1)
        .returning(|_, _| Err(LedgerError::WriteError("students.xlsx".into(), "Permission denied".into())));
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();
    let (status, body) = post_request("/verify-payment", &valid_confirmation(), configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({"status": "error", "message": "Post-payment processing error"}));
    assert!(!body.contains("Permission denied"));
}

#[actix_web::test]
async fn email_failure_deletes_the_registration() {
    let _ = env_logger::try_init().ok();
    let mut db = MockRegistrationStore::new();
    db.expect_insert_registration().times(1).returning(|_| Ok(12));
    db.expect_fetch_registration().times(1).returning(|id| Ok(Some(registration(id, PAYMENT_ID))));
    db.expect_delete_registration()
        .withf(|id| *id == 12)
        .times(1)
        .returning(|_| Err(StorageError::DatabaseError("disk I/O error".into())));
    let mut ledger = MockLedger::new();
    ledger.expect_append().times(1).returning(|_, _| Ok(()));
    let mut mailer = MockMailer::new();
    mailer.expect_send().times(1).returning(|_| Err(NotificationError::Unreachable("connection refused".into())));
    let (status, body) = post_request("/verify-payment", &valid_confirmation(), configure(db, ledger, mailer)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body), json!({"status": "error", "message": "Post-payment processing error"}));
}
