use std::fmt::Debug;

use chrono::Utc;
use log::*;
use serde::{Deserialize, Serialize};

use super::{CheckoutError, RegistrationForm};
use crate::{
    db_types::RegistrantInfo,
    traits::{PaymentProcessor, ProcessorOrderRequest},
};

/// Everything the browser needs to open the processor's checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOrder {
    pub order_id: String,
    pub key_id: String,
    /// In paise
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub student_info: RegistrantInfo,
    pub prefill: CheckoutPrefill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// `CheckoutApi` turns a registration form into a processor order.
///
/// Nothing is stored at this stage. The registration is only written once the payment has been confirmed (see
/// [`super::RegistrationFlowApi`]).
pub struct CheckoutApi<P> {
    processor: P,
    currency: String,
    academy_name: String,
}

impl<P> Debug for CheckoutApi<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi ({})", self.currency)
    }
}

impl<P> CheckoutApi<P> {
    pub fn new<S: Into<String>>(processor: P, currency: S, academy_name: S) -> Self {
        Self { processor, currency: currency.into(), academy_name: academy_name.into() }
    }
}

impl<P> CheckoutApi<P>
where P: PaymentProcessor
{
    pub async fn create_order(&self, form: RegistrationForm) -> Result<CheckoutOrder, CheckoutError> {
        let registrant = form.validate()?;
        let request = ProcessorOrderRequest {
            amount: registrant.amount.paise(),
            currency: self.currency.clone(),
            receipt: new_receipt_id(),
        };
        debug!("🛒️ Requesting a {} {} order for {}", request.amount, request.currency, registrant.course);
        let order = self.processor.create_order(request).await.map_err(|e| {
            error!("🛒️ The payment processor could not create an order for {}. {e}", registrant.email);
            CheckoutError::from(e)
        })?;
        info!("🛒️ Order {} created for {} ({})", order.order_id, registrant.email, registrant.course);
        let prefill = CheckoutPrefill {
            name: registrant.name.clone(),
            email: registrant.email.clone(),
            contact: registrant.phone.clone(),
        };
        Ok(CheckoutOrder {
            order_id: order.order_id,
            key_id: self.processor.key_id(),
            amount: registrant.amount.paise(),
            currency: self.currency.clone(),
            name: self.academy_name.clone(),
            description: format!("Course Registration for {}", registrant.course),
            student_info: registrant,
            prefill,
        })
    }
}

/// Generates a receipt identifier from the current time, e.g. `receipt_1718000000000`.
///
/// Two orders created in the same millisecond get the same receipt. The processor does not require receipts to be
/// unique.
pub fn new_receipt_id() -> String {
    format!("receipt_{}", Utc::now().timestamp_millis())
}
