use std::fmt::Debug;

use asta_common::Secret;
use log::*;

use super::RegistrationFlowError;
use crate::{
    db_types::{NewRegistration, RegistrantInfo, Registration},
    helpers::PaymentSignature,
    ledger::{LedgerKind, LedgerRecord},
    notifications::EmailTemplates,
    traits::{LedgerWriter, Notifier, RegistrationManagement},
};

/// `RegistrationFlowApi` handles payment confirmations sent back by the browser after a completed checkout.
///
/// A confirmation is processed as a strict sequence of steps:
/// 1. The payment signature is verified. Nothing else in the payload is trusted, and nothing happens if it is wrong.
/// 2. The registration is inserted.
/// 3. The new row is read back, to pick up its server-assigned registration date.
/// 4. The row is appended to the students ledger.
/// 5. The confirmation email is sent.
///
/// If any of steps 3 to 5 fail, the registration is deleted again so that no registration exists without a ledger row
/// and a confirmation email. The deletion is best effort: if it fails, the failure is logged and the row remains. A
/// ledger row written before an email failure is not removed.
///
/// There is no idempotency check. Confirming the same payment twice stores two registrations.
pub struct RegistrationFlowApi<B, L, N> {
    db: B,
    ledger: L,
    notifier: N,
    templates: EmailTemplates,
    key_secret: Secret<String>,
}

impl<B, L, N> Debug for RegistrationFlowApi<B, L, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RegistrationFlowApi")
    }
}

impl<B, L, N> RegistrationFlowApi<B, L, N> {
    pub fn new(db: B, ledger: L, notifier: N, templates: EmailTemplates, key_secret: Secret<String>) -> Self {
        Self { db, ledger, notifier, templates, key_secret }
    }
}

impl<B, L, N> RegistrationFlowApi<B, L, N>
where
    B: RegistrationManagement,
    L: LedgerWriter,
    N: Notifier,
{
    pub async fn confirm_payment(
        &self,
        payment: PaymentSignature,
        registrant: RegistrantInfo,
    ) -> Result<Registration, RegistrationFlowError> {
        if let Err(e) = payment.verify(self.key_secret.reveal()) {
            warn!("💳️ Rejecting confirmation for order {} / payment {}. {e}", payment.order_id, payment.payment_id);
            return Err(e.into());
        }
        debug!("💳️ Signature verified for order {} / payment {}", payment.order_id, payment.payment_id);
        let new_registration = NewRegistration::new(registrant, payment.payment_id.clone());
        let id = self.db.insert_registration(new_registration).await.map_err(|e| {
            error!("💳️ Could not store the registration for payment {}. {e}", payment.payment_id);
            RegistrationFlowError::InsertFailed(e)
        })?;
        match self.complete_registration(id).await {
            Ok(registration) => {
                info!("💳️ Registration #{id} for payment {} is complete", payment.payment_id);
                Ok(registration)
            },
            Err(e) => {
                error!("💳️ Post-payment processing for registration #{id} failed. {e}");
                self.discard_registration(id).await;
                Err(e)
            },
        }
    }

    async fn complete_registration(&self, id: i64) -> Result<Registration, RegistrationFlowError> {
        let registration = self
            .db
            .fetch_registration(id)
            .await
            .map_err(|e| RegistrationFlowError::ReadBackFailed(id, e.to_string()))?
            .ok_or_else(|| RegistrationFlowError::ReadBackFailed(id, "The row does not exist".to_string()))?;
        self.ledger
            .append(LedgerKind::Students, LedgerRecord::from(&registration))
            .await
            .map_err(|e| RegistrationFlowError::LedgerFailed(id, e))?;
        trace!("💳️ Registration #{id} added to the students ledger");
        let email = self.templates.registration_confirmation(&registration);
        self.notifier.send(email).await.map_err(|e| RegistrationFlowError::NotificationFailed(id, e))?;
        trace!("💳️ Confirmation email for registration #{id} sent to {}", registration.email);
        Ok(registration)
    }

    async fn discard_registration(&self, id: i64) {
        match self.db.delete_registration(id).await {
            Ok(true) => info!("💳️ Incomplete registration #{id} has been deleted"),
            Ok(false) => warn!("💳️ Incomplete registration #{id} was already gone"),
            Err(e) => error!("💳️ Could not delete incomplete registration #{id}. It remains in the database. {e}"),
        }
    }
}
