use asta_engine::{
    notifications::EmailMessage,
    traits::{NotificationError, Notifier},
};
use gateway_tools::{GatewayApiError, MailRelayApi, OutgoingEmail};
use log::*;

/// [`Notifier`] that hands emails to the mail relay, always sent from the academy's own address.
#[derive(Clone)]
pub struct MailRelayNotifier {
    api: MailRelayApi,
    sender: String,
}

impl MailRelayNotifier {
    pub fn new<S: Into<String>>(api: MailRelayApi, sender: S) -> Self {
        Self { api, sender: sender.into() }
    }
}

impl Notifier for MailRelayNotifier {
    async fn send(&self, email: EmailMessage) -> Result<(), NotificationError> {
        let outgoing = OutgoingEmail {
            from: self.sender.clone(),
            to: email.to,
            bcc: email.bcc,
            subject: email.subject,
            html: email.html,
        };
        let receipt = self.api.send_email(&outgoing).await.map_err(|e| match e {
            GatewayApiError::QueryError { status, message } => {
                NotificationError::Rejected(format!("{status}: {message}"))
            },
            e => NotificationError::Unreachable(e.to_string()),
        })?;
        debug!("📧️ Mail relay accepted \"{}\" for {} ({})", outgoing.subject, outgoing.to, receipt.status);
        Ok(())
    }
}
