use std::sync::Arc;

use log::*;
use reqwest::Client;

use crate::{
    config::MailRelayConfig,
    data_objects::{OutgoingEmail, RelayReceipt},
    GatewayApiError,
};

/// Client for an HTTP transactional-email relay. The relay receives the rendered message as JSON and takes care of
/// SMTP delivery.
#[derive(Clone)]
pub struct MailRelayApi {
    config: MailRelayConfig,
    client: Arc<Client>,
}

impl MailRelayApi {
    pub fn new(config: MailRelayConfig) -> Result<Self, GatewayApiError> {
        let client = Client::builder().build().map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn relay_url(&self) -> &str {
        self.config.relay_url.as_str()
    }

    /// Hands the email to the relay. Any non-2xx response is an error.
    pub async fn send_email(&self, email: &OutgoingEmail) -> Result<RelayReceipt, GatewayApiError> {
        trace!("📧️ Relaying email '{}' to {}", email.subject, email.to);
        let mut req = self.client.post(self.relay_url()).json(email);
        if !self.config.api_token.is_unset() {
            req = req.bearer_auth(self.config.api_token.reveal());
        }
        let response = req.send().await.map_err(|e| GatewayApiError::RestRequestError(e.to_string()))?;
        let status = response.status().as_u16();
        let success = response.status().is_success();
        let message = response.text().await.map_err(|e| GatewayApiError::RestResponseError(e.to_string()))?;
        if success {
            debug!("📧️ Mail relay accepted '{}'. {status}: {message}", email.subject);
            Ok(RelayReceipt { status, response: message })
        } else {
            Err(GatewayApiError::QueryError { status, message })
        }
    }
}
