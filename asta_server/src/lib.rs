//! # ASTA server
//! This crate hosts the HTTP backend of the ASTA Education Academy website. It is responsible for:
//! * Creating payment orders for course registrations with the payment processor.
//! * Confirming completed payments, storing the registration, recording it in the students ledger and emailing the
//!   registrant.
//! * Accepting contact-page and about-page inquiries and forwarding them to the academy mailbox.
//! * Serving the stored records and the spreadsheet ledgers to the admin dashboard.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/create-order`: Validates a registration form and creates a processor order.
//! * `/verify-payment`: Confirms a completed payment.
//! * `/submit-contact` and `/submit-about-inquiry`: The two inquiry forms.
//! * `/api/students`, `/api/contact-messages`, `/api/about-inquiries`: Stored records, newest first.
//! * `/api/download/{file}`: One of the spreadsheet ledgers (`students`, `contact` or `about`).
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;
