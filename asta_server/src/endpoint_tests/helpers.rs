use actix_web::{
    http::{header::ContentType, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use asta_engine::db_types::{Inquiry, PaymentStatus, Registration, Rupees};
use chrono::{TimeZone, Utc};
use log::debug;
use serde_json::Value;

use crate::helpers::json_error_handler;

async fn call(req: TestRequest, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    let app = App::new().app_data(web::JsonConfig::default().error_handler(json_error_handler)).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn post_request(path: &str, body: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).insert_header(ContentType::json()).set_payload(body.to_string());
    call(req, configure).await
}

pub async fn get_request(path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    call(TestRequest::get().uri(path), configure).await
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response was not JSON ({e}): {body}"))
}

pub fn registration(id: i64, payment_id: &str) -> Registration {
    Registration {
        id,
        name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        phone: "9876543210".into(),
        course: "Phonics".into(),
        payment_id: Some(payment_id.into()),
        payment_status: PaymentStatus::Successful,
        amount: Rupees::from_rupees(1499),
        registration_date: Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap(),
    }
}

pub fn inquiry(id: i64, phone: Option<&str>) -> Inquiry {
    Inquiry {
        id,
        name: "Vikram".into(),
        email: "vikram@example.com".into(),
        phone: phone.map(String::from),
        subject: "Batch timings".into(),
        message: "Are there weekend batches?".into(),
        submission_date: Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
    }
}
