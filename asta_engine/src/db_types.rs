//! Data types that are stored in, and read back from, the relational store.
use std::{fmt::Display, str::FromStr};

pub use asta_common::Rupees;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(pub String);

//--------------------------------------    PaymentStatus     ---------------------------------------------------------
/// The status recorded against a registration.
///
/// Registrations are only ever written once the payment signature has been verified, so `Successful` is the only
/// status the workflow produces. There is deliberately no pending or failed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Successful,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Successful => write!(f, "successful"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "successful" => Ok(Self::Successful),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------    RegistrantInfo    ---------------------------------------------------------
/// The registrant details that travel with a checkout: submitted with the order request, echoed back to the browser,
/// and returned to us with the payment confirmation.
///
/// None of these fields are trustworthy by the time they reach `/verify-payment`. They are whatever the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub amount: Rupees,
}

//--------------------------------------   NewRegistration    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub registrant: RegistrantInfo,
    /// The processor's payment id
    pub payment_id: String,
    pub payment_status: PaymentStatus,
}

impl NewRegistration {
    pub fn new(registrant: RegistrantInfo, payment_id: String) -> Self {
        Self { registrant, payment_id, payment_status: PaymentStatus::Successful }
    }
}

//--------------------------------------     Registration     ---------------------------------------------------------
/// A paid course registration (a row of the `students` table).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub amount: Rupees,
    pub registration_date: DateTime<Utc>,
}

//--------------------------------------     InquiryKind      ---------------------------------------------------------
/// Which form an inquiry came from. Each kind has its own table and ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryKind {
    Contact,
    About,
}

impl InquiryKind {
    pub fn table_name(&self) -> &'static str {
        match self {
            InquiryKind::Contact => "contact_messages",
            InquiryKind::About => "about_inquiries",
        }
    }
}

impl Display for InquiryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryKind::Contact => write!(f, "contact message"),
            InquiryKind::About => write!(f, "about inquiry"),
        }
    }
}

//--------------------------------------      NewInquiry      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

//--------------------------------------        Inquiry       ---------------------------------------------------------
/// A contact-page or about-page submission.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub submission_date: DateTime<Utc>,
}
