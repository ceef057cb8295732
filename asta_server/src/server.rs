use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{Condition, Logger},
    web,
    App,
    HttpServer,
};
use asta_engine::{
    notifications::EmailTemplates,
    CheckoutApi,
    InquiryFlowApi,
    RecordsApi,
    RegistrationFlowApi,
    SqliteDatabase,
    XlsxLedger,
};
use gateway_tools::{MailRelayApi, RazorpayApi};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    helpers::json_error_handler,
    integrations::{mail_relay::MailRelayNotifier, razorpay::RazorpayProcessor},
    routes::{
        health,
        AboutInquiriesRoute,
        ContactMessagesRoute,
        CreateOrderRoute,
        DownloadLedgerRoute,
        StudentsRoute,
        SubmitAboutInquiryRoute,
        SubmitContactRoute,
        VerifyPaymentRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    tokio::fs::create_dir_all(&config.data_dir).await.map_err(|e| {
        ServerError::InitializeError(format!("Could not create data directory {}. {e}", config.data_dir.display()))
    })?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Database at {} is ready", db.url());
    let razorpay = RazorpayApi::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let mail_relay =
        MailRelayApi::new(config.mail_relay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let processor = RazorpayProcessor::new(razorpay);
    let notifier = MailRelayNotifier::new(mail_relay, config.academy.email.clone());
    let ledger = XlsxLedger::new(config.data_dir.clone());
    info!("📒️ Ledgers are kept in {}", ledger.dir().display());
    let srv = create_server_instance(config, db.clone(), ledger, processor, notifier)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    info!("🗃️ Closing database connections");
    db.close().await;
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    ledger: XlsxLedger,
    processor: RazorpayProcessor,
    notifier: MailRelayNotifier,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let templates = EmailTemplates::new(config.academy.name.as_str(), config.academy.email.as_str());
        let checkout_api =
            CheckoutApi::new(processor.clone(), config.currency.as_str(), config.academy.name.as_str());
        let registration_api = RegistrationFlowApi::new(
            db.clone(),
            ledger.clone(),
            notifier.clone(),
            templates.clone(),
            config.razorpay.key_secret.clone(),
        );
        let inquiry_api = InquiryFlowApi::new(db.clone(), ledger.clone(), notifier.clone(), templates);
        let records_api = RecordsApi::new(db.clone(), ledger.clone());
        let admin_scope = web::scope("/api")
            .service(StudentsRoute::<SqliteDatabase, XlsxLedger>::new())
            .service(ContactMessagesRoute::<SqliteDatabase, XlsxLedger>::new())
            .service(AboutInquiriesRoute::<SqliteDatabase, XlsxLedger>::new())
            .service(DownloadLedgerRoute::<SqliteDatabase, XlsxLedger>::new());
        App::new()
            .wrap(Condition::new(config.cors_origin.is_some(), cors(config.cors_origin.as_deref())))
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("asta::access_log"))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(registration_api))
            .app_data(web::Data::new(inquiry_api))
            .app_data(web::Data::new(records_api))
            .service(health)
            .service(CreateOrderRoute::<RazorpayProcessor>::new())
            .service(VerifyPaymentRoute::<SqliteDatabase, XlsxLedger, MailRelayNotifier>::new())
            .service(SubmitContactRoute::<SqliteDatabase, XlsxLedger, MailRelayNotifier>::new())
            .service(SubmitAboutInquiryRoute::<SqliteDatabase, XlsxLedger, MailRelayNotifier>::new())
            .service(admin_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Browser access for the front-end origin. With no origin configured the middleware is switched off entirely.
pub fn cors(origin: Option<&str>) -> Cors {
    match origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials(),
        None => Cors::default(),
    }
}
