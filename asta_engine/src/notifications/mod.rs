//! Transactional email rendering.
//!
//! The engine only renders messages. Delivery is the job of a [`Notifier`](crate::traits::Notifier) implementation.
mod templates;

use serde::{Deserialize, Serialize};
pub use templates::{escape_html, EmailTemplates};

/// A rendered email, ready for delivery. The sender address is the notifier's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub html: String,
}
