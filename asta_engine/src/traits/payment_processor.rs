use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PaymentProcessorError {
    #[error("The payment processor rejected the order. {0}")]
    OrderRejected(String),
    #[error("Could not communicate with the payment processor. {0}")]
    CommunicationError(String),
}

/// An order creation request, in the processor's minor currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// The processor-issued order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

#[allow(async_fn_in_trait)]
pub trait PaymentProcessor {
    /// The public key id that the client-side checkout needs.
    fn key_id(&self) -> String;

    async fn create_order(&self, request: ProcessorOrderRequest) -> Result<ProcessorOrder, PaymentProcessorError>;
}
