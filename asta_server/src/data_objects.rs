use std::fmt::Display;

use asta_engine::{
    db_types::RegistrantInfo,
    helpers::PaymentSignature,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

/// The response shape of `/verify-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: String,
    pub message: String,
}

impl PaymentStatusResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { status: "success".to_string(), message: message.to_string() }
    }
}

/// What the browser posts to `/verify-payment` once the processor's checkout has completed.
///
/// Only the three processor fields are authenticated (by the signature). `student_info` is whatever the browser
/// decided to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub student_info: RegistrantInfo,
}

impl PaymentConfirmation {
    pub fn into_parts(self) -> (PaymentSignature, RegistrantInfo) {
        let Self { razorpay_order_id, razorpay_payment_id, razorpay_signature, student_info } = self;
        (PaymentSignature::new(razorpay_order_id, razorpay_payment_id, razorpay_signature), student_info)
    }
}
