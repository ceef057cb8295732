use thiserror::Error;

use crate::notifications::EmailMessage;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("The mail relay rejected the message. {0}")]
    Rejected(String),
    #[error("Could not reach the mail relay. {0}")]
    Unreachable(String),
}

/// Delivers rendered emails. An error means the message was not accepted for delivery.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn send(&self, email: EmailMessage) -> Result<(), NotificationError>;
}
