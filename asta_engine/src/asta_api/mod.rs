//! # ASTA engine public API
//!
//! The `asta_api` module exposes the workflows of the academy backend. Each API is created by supplying the backends
//! it needs, as implementations of the traits in [`crate::traits`]:
//!
//! * [`CheckoutApi`] validates a registration form and asks the payment processor for an order. Nothing is stored.
//! * [`RegistrationFlowApi`] confirms a completed payment: it verifies the signature, stores the registration, mirrors
//!   it to the students ledger and emails the registrant. If the ledger or email step fails, the stored registration is
//!   deleted again.
//! * [`InquiryFlowApi`] stores contact and about-page inquiries, mirrors them and notifies the academy. Inquiries are
//!   never rolled back.
//! * [`RecordsApi`] is the read-only admin surface.
//!
//! ```rust,ignore
//! use asta_engine::{RecordsApi, SqliteDatabase, XlsxLedger};
//! let db = SqliteDatabase::new_with_url("sqlite://data/asta_education.db", 5).await?;
//! let api = RecordsApi::new(db, XlsxLedger::new("data"));
//! let students = api.registrations().await?;
//! ```
mod checkout_api;
mod errors;
mod form_objects;
mod inquiry_flow_api;
mod records_api;
mod registration_flow_api;

pub use checkout_api::{CheckoutApi, CheckoutOrder, CheckoutPrefill};
pub use errors::{CheckoutError, InquiryFlowError, RegistrationFlowError};
pub use form_objects::{InquiryForm, RegistrationForm, INQUIRY_FIELDS_REQUIRED, REGISTRATION_FIELDS_REQUIRED};
pub use inquiry_flow_api::InquiryFlowApi;
pub use records_api::RecordsApi;
pub use registration_flow_api::RegistrationFlowApi;
