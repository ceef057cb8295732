use thiserror::Error;

use crate::{
    helpers::PaymentSignatureError,
    traits::{LedgerError, NotificationError, PaymentProcessorError, StorageError},
};

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Could not create a processor order. {0}")]
    ProcessorError(#[from] PaymentProcessorError),
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationFlowError {
    #[error("Invalid payment signature")]
    InvalidSignature,
    #[error("Payment signature could not be checked. {0}")]
    SignatureError(String),
    #[error("Could not store the registration. {0}")]
    InsertFailed(StorageError),
    #[error("Registration #{0} could not be read back. {1}")]
    ReadBackFailed(i64, String),
    #[error("Registration #{0} could not be written to the ledger. {1}")]
    LedgerFailed(i64, LedgerError),
    #[error("Confirmation email for registration #{0} was not sent. {1}")]
    NotificationFailed(i64, NotificationError),
}

impl RegistrationFlowError {
    /// The id of the registration that was inserted before this error occurred, if any. Such registrations are
    /// deleted again before the error is returned.
    pub fn orphaned_id(&self) -> Option<i64> {
        match self {
            Self::ReadBackFailed(id, _) | Self::LedgerFailed(id, _) | Self::NotificationFailed(id, _) => Some(*id),
            _ => None,
        }
    }
}

impl From<PaymentSignatureError> for RegistrationFlowError {
    fn from(e: PaymentSignatureError) -> Self {
        match e {
            PaymentSignatureError::Mismatch => Self::InvalidSignature,
            PaymentSignatureError::InvalidKey(s) => Self::SignatureError(s),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum InquiryFlowError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Could not store the inquiry. {0}")]
    InsertFailed(StorageError),
    #[error("Inquiry #{0} could not be read back. {1}")]
    ReadBackFailed(i64, String),
    #[error("Inquiry #{0} could not be written to the ledger. {1}")]
    LedgerFailed(i64, LedgerError),
    #[error("Notification for inquiry #{0} was not sent. {1}")]
    NotificationFailed(i64, NotificationError),
}
