//! # Payment confirmation signatures
//!
//! When a checkout completes, the payment processor hands the browser three values: the order id, the payment id and
//! a signature. The browser forwards them to us, along with the registrant details. Of everything the browser sends,
//! only this triple can be trusted, and only once the signature has been checked.
//!
//! The signature is
//!
//! ```text
//!    hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))
//! ```
//!
//! in lowercase hexadecimal. It is compared to the supplied value by exact string equality.
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentSignatureError {
    #[error("The payment signature does not match")]
    Mismatch,
    #[error("Could not compute a payment signature. {0}")]
    InvalidKey(String),
}

/// Computes the signature the processor would have produced for this order and payment.
pub fn calculate_payment_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
) -> Result<String, PaymentSignatureError> {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .map_err(|e| PaymentSignatureError::InvalidKey(e.to_string()))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSignature {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentSignature {
    pub fn new<S: Into<String>>(order_id: S, payment_id: S, signature: S) -> Self {
        Self { order_id: order_id.into(), payment_id: payment_id.into(), signature: signature.into() }
    }

    pub fn verify(&self, key_secret: &str) -> Result<(), PaymentSignatureError> {
        let expected = calculate_payment_signature(key_secret, &self.order_id, &self.payment_id)?;
        if expected == self.signature {
            Ok(())
        } else {
            Err(PaymentSignatureError::Mismatch)
        }
    }
}
