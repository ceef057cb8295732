use asta_engine::traits::{PaymentProcessor, PaymentProcessorError, ProcessorOrder, ProcessorOrderRequest};
use gateway_tools::{GatewayApiError, NewRazorpayOrder, RazorpayApi};
use log::*;

/// [`PaymentProcessor`] backed by the Razorpay REST API.
#[derive(Clone)]
pub struct RazorpayProcessor(RazorpayApi);

impl RazorpayProcessor {
    pub fn new(api: RazorpayApi) -> Self {
        Self(api)
    }
}

impl PaymentProcessor for RazorpayProcessor {
    fn key_id(&self) -> String {
        self.0.key_id().to_string()
    }

    async fn create_order(&self, request: ProcessorOrderRequest) -> Result<ProcessorOrder, PaymentProcessorError> {
        let order = NewRazorpayOrder::new(request.amount, &request.currency, request.receipt);
        let order = self.0.create_order(order).await.map_err(|e| {
            warn!("💳️ Razorpay order creation failed. {e}");
            match e {
                GatewayApiError::QueryError { status, message } => {
                    PaymentProcessorError::OrderRejected(format!("{status}: {message}"))
                },
                e => PaymentProcessorError::CommunicationError(e.to_string()),
            }
        })?;
        debug!("💳️ Razorpay order {} created for {} {}", order.id, order.amount, order.currency);
        Ok(ProcessorOrder { order_id: order.id, amount: order.amount, currency: order.currency })
    }
}
