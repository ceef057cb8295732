use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use asta_engine::{db_types::InquiryKind, CheckoutError, InquiryFlowError, RegistrationFlowError};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Every error a request can end in.
///
/// The `Display` text carries the full detail and is only ever logged. Response bodies carry the short public message
/// for the variant.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{public}. {detail}")]
    BackendError { public: &'static str, detail: String },
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("{0}")]
    PaymentRejected(String),
    #[error("{public}. {detail}")]
    PaymentFailed { public: &'static str, detail: String },
}

impl ServerError {
    pub fn backend<S: ToString>(public: &'static str, detail: S) -> Self {
        Self::BackendError { public, detail: detail.to_string() }
    }

    fn public_body(&self) -> serde_json::Value {
        match self {
            Self::ValidationError(msg) => json!({ "error": msg }),
            Self::BackendError { public, .. } => json!({ "error": public }),
            Self::NoRecordFound(_) => json!({ "error": "File not found" }),
            Self::PaymentRejected(msg) => json!({ "status": "failure", "message": msg }),
            Self::PaymentFailed { public, .. } => json!({ "status": "error", "message": public }),
            Self::InitializeError(_) | Self::IOError(_) | Self::Unspecified(_) => json!({ "error": "Server error" }),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::PaymentRejected(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::BackendError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💻️ {self}");
        }
        HttpResponse::build(status).insert_header(ContentType::json()).body(self.public_body().to_string())
    }
}

impl From<CheckoutError> for ServerError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::ValidationError(msg) => Self::ValidationError(msg),
            CheckoutError::ProcessorError(e) => Self::backend("Error creating order", e),
        }
    }
}

impl From<RegistrationFlowError> for ServerError {
    fn from(e: RegistrationFlowError) -> Self {
        let public = match &e {
            RegistrationFlowError::InvalidSignature => return Self::PaymentRejected("Invalid signature".into()),
            RegistrationFlowError::SignatureError(_) => "Payment verification error",
            RegistrationFlowError::InsertFailed(_) => "Database error",
            RegistrationFlowError::ReadBackFailed(..) => "Error fetching student details",
            RegistrationFlowError::LedgerFailed(..) | RegistrationFlowError::NotificationFailed(..) => {
                "Post-payment processing error"
            },
        };
        Self::PaymentFailed { public, detail: e.to_string() }
    }
}

impl ServerError {
    /// Maps an inquiry submission failure. The read-back message differs between the two forms.
    pub fn from_inquiry_error(kind: InquiryKind, e: InquiryFlowError) -> Self {
        match e {
            InquiryFlowError::ValidationError(msg) => Self::ValidationError(msg),
            InquiryFlowError::InsertFailed(_) => Self::backend("Database error", e),
            InquiryFlowError::ReadBackFailed(..) => match kind {
                InquiryKind::Contact => Self::backend("Error fetching message details", e),
                InquiryKind::About => Self::backend("Error fetching inquiry details", e),
            },
            InquiryFlowError::LedgerFailed(..) | InquiryFlowError::NotificationFailed(..) => {
                Self::backend("Error processing your message", e)
            },
        }
    }
}
