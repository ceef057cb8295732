use asta_common::Secret;
use log::*;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    /// Base URL of the Razorpay REST API, without a trailing slash.
    pub api_url: String,
    /// The public key id. This is handed to the checkout widget, so it is not a secret.
    pub key_id: String,
    /// Used for HTTP basic auth against the API, and as the HMAC key for payment signatures.
    pub key_secret: Secret<String>,
}

impl RazorpayConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("ASTA_RAZORPAY_API_URL").unwrap_or_else(|_| {
            debug!("ASTA_RAZORPAY_API_URL not set, using {DEFAULT_RAZORPAY_API_URL}");
            DEFAULT_RAZORPAY_API_URL.to_string()
        });
        let key_id = std::env::var("ASTA_RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            error!("🪛️ ASTA_RAZORPAY_KEY_ID not set, using (probably useless) default");
            "your_razorpay_key_id".to_string()
        });
        let key_secret = Secret::new(std::env::var("ASTA_RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            error!("🪛️ ASTA_RAZORPAY_KEY_SECRET not set, using (probably useless) default");
            "your_razorpay_key_secret".to_string()
        }));
        Self { api_url: api_url.trim_end_matches('/').to_string(), key_id, key_secret }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MailRelayConfig {
    /// The relay endpoint that accepts a JSON email payload via POST.
    pub relay_url: String,
    /// Bearer token for the relay.
    pub api_token: Secret<String>,
}

impl MailRelayConfig {
    pub fn new_from_env_or_default() -> Self {
        let relay_url = std::env::var("ASTA_MAIL_RELAY_URL").unwrap_or_else(|_| {
            error!("🪛️ ASTA_MAIL_RELAY_URL not set. Emails cannot be delivered, so every form submission will fail.");
            "http://127.0.0.1:8025/send".to_string()
        });
        let api_token = Secret::new(std::env::var("ASTA_MAIL_RELAY_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ ASTA_MAIL_RELAY_TOKEN not set. Requests to the mail relay will be unauthenticated.");
            String::default()
        }));
        Self { relay_url, api_token }
    }
}
