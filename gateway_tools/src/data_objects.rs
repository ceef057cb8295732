use serde::{Deserialize, Serialize};

/// Request body for `POST /orders`. `amount` is in the currency's minor unit (paise for INR).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRazorpayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    /// `1` asks the processor to capture the payment automatically once it is authorised.
    pub payment_capture: u8,
}

impl NewRazorpayOrder {
    pub fn new(amount: i64, currency: &str, receipt: String) -> Self {
        Self { amount, currency: currency.to_string(), receipt, payment_capture: 1 }
    }
}

/// The subset of the processor's order entity that we care about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RazorpayOrder {
    pub id: String,
    #[serde(default)]
    pub entity: String,
    pub amount: i64,
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub amount_due: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
}

/// A fully rendered email, ready to hand to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    pub subject: String,
    pub html: String,
}

/// What the relay told us when it accepted a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub status: u16,
    pub response: String,
}
