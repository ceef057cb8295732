use std::fmt::Debug;

use log::*;

use super::InquiryFlowError;
use crate::{
    db_types::{Inquiry, InquiryKind, NewInquiry},
    ledger::{LedgerKind, LedgerRecord},
    notifications::EmailTemplates,
    traits::{InquiryManagement, LedgerWriter, Notifier},
};

/// `InquiryFlowApi` stores contact-page and about-page submissions, mirrors them to their ledger, and notifies the
/// academy mailbox.
///
/// Unlike registrations, a stored inquiry is kept even if the ledger or email step fails afterwards.
pub struct InquiryFlowApi<B, L, N> {
    db: B,
    ledger: L,
    notifier: N,
    templates: EmailTemplates,
}

impl<B, L, N> Debug for InquiryFlowApi<B, L, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InquiryFlowApi")
    }
}

impl<B, L, N> InquiryFlowApi<B, L, N> {
    pub fn new(db: B, ledger: L, notifier: N, templates: EmailTemplates) -> Self {
        Self { db, ledger, notifier, templates }
    }
}

impl<B, L, N> InquiryFlowApi<B, L, N>
where
    B: InquiryManagement,
    L: LedgerWriter,
    N: Notifier,
{
    pub async fn submit(&self, kind: InquiryKind, inquiry: NewInquiry) -> Result<Inquiry, InquiryFlowError> {
        let id = self.db.insert_inquiry(kind, inquiry).await.map_err(|e| {
            error!("📨️ Could not store new {kind}. {e}");
            InquiryFlowError::InsertFailed(e)
        })?;
        let result = self.publish(kind, id).await;
        match &result {
            Ok(_) => info!("📨️ New {kind} #{id} processed"),
            Err(e) => error!("📨️ Processing {kind} #{id} failed. The inquiry is kept. {e}"),
        }
        result
    }

    async fn publish(&self, kind: InquiryKind, id: i64) -> Result<Inquiry, InquiryFlowError> {
        let inquiry = self
            .db
            .fetch_inquiry(kind, id)
            .await
            .map_err(|e| InquiryFlowError::ReadBackFailed(id, e.to_string()))?
            .ok_or_else(|| InquiryFlowError::ReadBackFailed(id, "The row does not exist".to_string()))?;
        let ledger = match kind {
            InquiryKind::Contact => LedgerKind::ContactMessages,
            InquiryKind::About => LedgerKind::AboutInquiries,
        };
        self.ledger
            .append(ledger, LedgerRecord::from_inquiry(kind, &inquiry))
            .await
            .map_err(|e| InquiryFlowError::LedgerFailed(id, e))?;
        let email = self.templates.inquiry_notification(kind, &inquiry);
        self.notifier.send(email).await.map_err(|e| InquiryFlowError::NotificationFailed(id, e))?;
        Ok(inquiry)
    }
}
