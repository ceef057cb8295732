use std::{env, path::PathBuf};

use asta_common::INR_CURRENCY_CODE;
use asta_engine::SQLITE_DB_URL;
use gateway_tools::{MailRelayConfig, RazorpayConfig};
use log::*;

const DEFAULT_ASTA_HOST: &str = "127.0.0.1";
const DEFAULT_ASTA_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_ACADEMY_NAME: &str = "ASTA Education Academy";
const DEFAULT_ACADEMY_EMAIL: &str = "info@astaeducation.example";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Where the spreadsheet ledgers are kept
    pub data_dir: PathBuf,
    /// The currency that processor orders are created in
    pub currency: String,
    pub academy: AcademyConfig,
    /// The front-end origin that may call the API from a browser. `None` disables CORS headers altogether.
    pub cors_origin: Option<String>,
    pub razorpay: RazorpayConfig,
    pub mail_relay: MailRelayConfig,
}

#[derive(Clone, Debug)]
pub struct AcademyConfig {
    /// Shown on the checkout and in emails
    pub name: String,
    /// The academy mailbox. Emails are sent from this address, and inquiries are forwarded to it.
    pub email: String,
}

impl Default for AcademyConfig {
    fn default() -> Self {
        Self { name: DEFAULT_ACADEMY_NAME.to_string(), email: DEFAULT_ACADEMY_EMAIL.to_string() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_ASTA_HOST.to_string(),
            port: DEFAULT_ASTA_PORT,
            database_url: SQLITE_DB_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            currency: INR_CURRENCY_CODE.to_string(),
            academy: AcademyConfig::default(),
            cors_origin: Some(DEFAULT_CORS_ORIGIN.to_string()),
            razorpay: RazorpayConfig::default(),
            mail_relay: MailRelayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("ASTA_HOST").ok().unwrap_or_else(|| DEFAULT_ASTA_HOST.into());
        let port = env::var("ASTA_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for ASTA_PORT. {e} Using the default, {DEFAULT_ASTA_PORT}, instead."
                    );
                    DEFAULT_ASTA_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_ASTA_PORT);
        let database_url = env::var("ASTA_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ ASTA_DATABASE_URL is not set. Using the default, {SQLITE_DB_URL}.");
            SQLITE_DB_URL.to_string()
        });
        let data_dir = env::var("ASTA_DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| {
            info!("🪛️ ASTA_DATA_DIR is not set. Ledgers will be kept in ./{DEFAULT_DATA_DIR}.");
            PathBuf::from(DEFAULT_DATA_DIR)
        });
        let currency = env::var("ASTA_CURRENCY").ok().unwrap_or_else(|| INR_CURRENCY_CODE.to_string());
        let academy = AcademyConfig::from_env_or_default();
        let cors_origin = parse_cors_origin(env::var("ASTA_CORS_ORIGIN").ok());
        match &cors_origin {
            Some(origin) => info!("🪛️ Accepting cross-origin requests from {origin}"),
            None => info!("🪛️ CORS is disabled"),
        }
        let razorpay = RazorpayConfig::new_from_env_or_default();
        let mail_relay = MailRelayConfig::new_from_env_or_default();
        Self { host, port, database_url, data_dir, currency, academy, cors_origin, razorpay, mail_relay }
    }
}

impl AcademyConfig {
    pub fn from_env_or_default() -> Self {
        let name = env::var("ASTA_ACADEMY_NAME").ok().unwrap_or_else(|| DEFAULT_ACADEMY_NAME.to_string());
        let email = env::var("ASTA_ACADEMY_EMAIL").ok().unwrap_or_else(|| {
            error!(
                "🪛️ ASTA_ACADEMY_EMAIL is not set. Using {DEFAULT_ACADEMY_EMAIL}, which is almost certainly not what \
                 you want."
            );
            DEFAULT_ACADEMY_EMAIL.to_string()
        });
        Self { name, email }
    }
}

/// An unset value selects the default front-end origin. `none`, `false` or `0` disable CORS.
fn parse_cors_origin(value: Option<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Some(DEFAULT_CORS_ORIGIN.to_string()),
        Some(s) if ["none", "false", "0"].contains(&s.to_lowercase().as_str()) => None,
        Some(s) => Some(s.trim_end_matches('/').to_string()),
    }
}
