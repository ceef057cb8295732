//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Spreadsheet reads and writes happen on the blocking pool inside the ledger
//! writer, so handlers only ever `await` them.
use std::io::ErrorKind;

use actix_web::{get, http::header::ContentDisposition, web, HttpResponse, Responder};
use asta_engine::{
    db_types::InquiryKind,
    traits::{InquiryManagement, LedgerWriter, Notifier, PaymentProcessor, RegistrationManagement},
    CheckoutApi,
    InquiryFlowApi,
    InquiryForm,
    RecordsApi,
    RegistrationFlowApi,
    RegistrationForm,
};
use log::*;

use crate::{
    data_objects::{JsonResponse, PaymentConfirmation, PaymentStatusResponse},
    errors::ServerError,
    helpers::XLSX_CONTENT_TYPE,
};

pub const PAYMENT_RECORDED: &str = "Payment successful and records updated";
pub const INQUIRY_RECEIVED: &str = "Your message has been sent successfully!";

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Checkout  ----------------------------------------------------
route!(create_order => Post "/create-order" impl PaymentProcessor);
/// Route handler for the order intent endpoint
///
/// Validates the registration form and creates an order with the payment processor. The response carries everything
/// the browser needs to open the processor's checkout. Nothing is stored until the payment is confirmed via
/// `/verify-payment`.
pub async fn create_order<P: PaymentProcessor>(
    body: web::Json<RegistrationForm>,
    api: web::Data<CheckoutApi<P>>,
) -> Result<HttpResponse, ServerError> {
    let form = body.into_inner();
    debug!("💻️ POST create-order for course {:?}", form.course);
    let order = api.create_order(form).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(verify_payment => Post "/verify-payment" impl RegistrationManagement, LedgerWriter, Notifier);
/// Route handler for payment confirmations
///
/// The body is parsed by hand so that a malformed confirmation gets the same `{status, message}` failure shape as a
/// bad signature.
pub async fn verify_payment<B, L, N>(
    body: web::Bytes,
    api: web::Data<RegistrationFlowApi<B, L, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: RegistrationManagement,
    L: LedgerWriter,
    N: Notifier,
{
    let confirmation = serde_json::from_slice::<PaymentConfirmation>(&body).map_err(|e| {
        debug!("💻️ Could not parse payment confirmation. {e}");
        ServerError::PaymentRejected("Invalid payment confirmation".into())
    })?;
    debug!("💻️ POST verify-payment for order {}", confirmation.razorpay_order_id);
    let (signature, registrant) = confirmation.into_parts();
    let registration = api.confirm_payment(signature, registrant).await?;
    debug!("💻️ Registration #{} recorded", registration.id);
    Ok(HttpResponse::Ok().json(PaymentStatusResponse::success(PAYMENT_RECORDED)))
}

//----------------------------------------------   Inquiries  ----------------------------------------------------
route!(submit_contact => Post "/submit-contact" impl InquiryManagement, LedgerWriter, Notifier);
pub async fn submit_contact<B, L, N>(
    body: web::Json<InquiryForm>,
    api: web::Data<InquiryFlowApi<B, L, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: InquiryManagement,
    L: LedgerWriter,
    N: Notifier,
{
    debug!("💻️ POST submit-contact");
    submit_inquiry(InquiryKind::Contact, body.into_inner(), api.as_ref()).await
}

route!(submit_about_inquiry => Post "/submit-about-inquiry" impl InquiryManagement, LedgerWriter, Notifier);
pub async fn submit_about_inquiry<B, L, N>(
    body: web::Json<InquiryForm>,
    api: web::Data<InquiryFlowApi<B, L, N>>,
) -> Result<HttpResponse, ServerError>
where
    B: InquiryManagement,
    L: LedgerWriter,
    N: Notifier,
{
    debug!("💻️ POST submit-about-inquiry");
    submit_inquiry(InquiryKind::About, body.into_inner(), api.as_ref()).await
}

async fn submit_inquiry<B, L, N>(
    kind: InquiryKind,
    form: InquiryForm,
    api: &InquiryFlowApi<B, L, N>,
) -> Result<HttpResponse, ServerError>
where
    B: InquiryManagement,
    L: LedgerWriter,
    N: Notifier,
{
    let inquiry = form.validate().map_err(|e| ServerError::from_inquiry_error(kind, e))?;
    api.submit(kind, inquiry).await.map_err(|e| ServerError::from_inquiry_error(kind, e))?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(INQUIRY_RECEIVED)))
}

//----------------------------------------------   Admin  ----------------------------------------------------
route!(students => Get "/students" impl RegistrationManagement, LedgerWriter);
pub async fn students<B, L>(api: web::Data<RecordsApi<B, L>>) -> Result<HttpResponse, ServerError>
where
    B: RegistrationManagement,
    L: LedgerWriter,
{
    trace!("💻️ GET students");
    let registrations = api.registrations().await.map_err(|e| ServerError::backend("Database error", e))?;
    Ok(HttpResponse::Ok().json(registrations))
}

route!(contact_messages => Get "/contact-messages" impl InquiryManagement, LedgerWriter);
pub async fn contact_messages<B, L>(api: web::Data<RecordsApi<B, L>>) -> Result<HttpResponse, ServerError>
where
    B: InquiryManagement,
    L: LedgerWriter,
{
    trace!("💻️ GET contact-messages");
    let inquiries =
        api.inquiries(InquiryKind::Contact).await.map_err(|e| ServerError::backend("Database error", e))?;
    Ok(HttpResponse::Ok().json(inquiries))
}

route!(about_inquiries => Get "/about-inquiries" impl InquiryManagement, LedgerWriter);
pub async fn about_inquiries<B, L>(api: web::Data<RecordsApi<B, L>>) -> Result<HttpResponse, ServerError>
where
    B: InquiryManagement,
    L: LedgerWriter,
{
    trace!("💻️ GET about-inquiries");
    let inquiries = api.inquiries(InquiryKind::About).await.map_err(|e| ServerError::backend("Database error", e))?;
    Ok(HttpResponse::Ok().json(inquiries))
}

route!(download_ledger => Get "/download/{file}" impl RegistrationManagement, LedgerWriter);
/// Sends one of the spreadsheet ledgers as an attachment. `{file}` is one of `students`, `contact` or `about`.
pub async fn download_ledger<B, L>(
    path: web::Path<String>,
    api: web::Data<RecordsApi<B, L>>,
) -> Result<HttpResponse, ServerError>
where
    B: RegistrationManagement,
    L: LedgerWriter,
{
    let key = path.into_inner();
    debug!("💻️ GET download for {key}");
    let (kind, file) =
        api.ledger_file(&key).ok_or_else(|| ServerError::NoRecordFound(format!("No ledger file for '{key}'")))?;
    let content = tokio::fs::read(&file).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ServerError::NoRecordFound(format!("{} has gone away", file.display())),
        _ => ServerError::IOError(e),
    })?;
    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(kind.file_name()))
        .body(content))
}
