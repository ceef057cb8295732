//! ASTA Engine
//!
//! The ASTA engine contains the core logic of the ASTA Education Academy backend: taking course registrations through
//! a third-party payment processor, and recording contact and about-page inquiries. It is independent of the web
//! framework and of the specific payment processor and mail relay in use.
//!
//! The library is divided into these main sections:
//! 1. Storage ([`SqliteDatabase`] and the data types in [`db_types`]). The relational store is the source of truth.
//! 2. Spreadsheet ledgers ([`mod@ledger`]), an append-only mirror of the stored records.
//! 3. Email rendering ([`mod@notifications`]).
//! 4. The workflow APIs ([`CheckoutApi`], [`RegistrationFlowApi`], [`InquiryFlowApi`] and [`RecordsApi`]). These are
//!    generic over the backend traits defined in [`mod@traits`], so that the server can plug in real services and the
//!    tests can plug in mocks.
mod asta_api;

pub mod db_types;
pub mod helpers;
pub mod ledger;
pub mod notifications;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use asta_api::{
    CheckoutApi,
    CheckoutError,
    CheckoutOrder,
    CheckoutPrefill,
    InquiryFlowApi,
    InquiryFlowError,
    InquiryForm,
    RecordsApi,
    RegistrationFlowApi,
    RegistrationFlowError,
    RegistrationForm,
    INQUIRY_FIELDS_REQUIRED,
    REGISTRATION_FIELDS_REQUIRED,
};
pub use ledger::XlsxLedger;
#[cfg(feature = "sqlite")]
pub use sqlite::{db::SQLITE_DB_URL, SqliteDatabase};
