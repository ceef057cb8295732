//! Thin HTTP clients for the two third-party services the academy backend talks to:
//!
//! * [`RazorpayApi`] creates payment orders with the Razorpay REST API.
//! * [`MailRelayApi`] hands fully rendered emails to a transactional mail relay.
//!
//! Neither client retries or sets timeouts. Every call is attempted exactly once and errors are returned to the caller.
mod config;
mod data_objects;
mod error;
mod mail_relay;
mod razorpay_api;

pub use config::{MailRelayConfig, RazorpayConfig};
pub use data_objects::{NewRazorpayOrder, OutgoingEmail, RazorpayOrder, RelayReceipt};
pub use error::GatewayApiError;
pub use mail_relay::MailRelayApi;
pub use razorpay_api::RazorpayApi;
