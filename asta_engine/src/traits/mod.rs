//! # Backend contracts
//!
//! The workflow APIs in this crate never talk to a database, a file or a remote service directly. They go through the
//! traits defined here, which lets the server plug in real implementations and lets tests plug in mocks.
//!
//! * [`RegistrationManagement`] stores paid course registrations.
//! * [`InquiryManagement`] stores contact-page and about-page inquiries.
//! * [`LedgerWriter`] mirrors stored records into the per-entity spreadsheet ledgers.
//! * [`Notifier`] delivers rendered emails.
//! * [`PaymentProcessor`] creates orders with the third-party payment processor.
mod inquiry_management;
mod ledger_writer;
mod notifier;
mod payment_processor;
mod registration_management;

pub use inquiry_management::InquiryManagement;
pub use ledger_writer::{LedgerError, LedgerWriter};
pub use notifier::{NotificationError, Notifier};
pub use payment_processor::{PaymentProcessor, PaymentProcessorError, ProcessorOrder, ProcessorOrderRequest};
pub use registration_management::{RegistrationManagement, StorageError};
