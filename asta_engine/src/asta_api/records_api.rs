use std::{fmt::Debug, path::PathBuf};

use log::*;

use crate::{
    db_types::{Inquiry, InquiryKind, Registration},
    ledger::LedgerKind,
    traits::{InquiryManagement, LedgerWriter, RegistrationManagement, StorageError},
};

/// Read-only access to everything the workflows have stored, for the admin dashboard.
///
/// Lists are returned newest first. There is no paging.
pub struct RecordsApi<B, L> {
    db: B,
    ledger: L,
}

impl<B, L> Debug for RecordsApi<B, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecordsApi")
    }
}

impl<B, L> RecordsApi<B, L> {
    pub fn new(db: B, ledger: L) -> Self {
        Self { db, ledger }
    }
}

impl<B, L> RecordsApi<B, L>
where B: RegistrationManagement
{
    pub async fn registrations(&self) -> Result<Vec<Registration>, StorageError> {
        self.db.fetch_registrations().await
    }
}

impl<B, L> RecordsApi<B, L>
where B: InquiryManagement
{
    pub async fn inquiries(&self, kind: InquiryKind) -> Result<Vec<Inquiry>, StorageError> {
        self.db.fetch_inquiries(kind).await
    }
}

impl<B, L> RecordsApi<B, L>
where L: LedgerWriter
{
    /// Resolves a download key (`students`, `contact` or `about`) to the ledger file.
    ///
    /// Returns `None` for an unknown key, or if the ledger has not been written yet.
    pub fn ledger_file(&self, key: &str) -> Option<(LedgerKind, PathBuf)> {
        let kind = LedgerKind::from_key(key)?;
        let path = self.ledger.ledger_path(kind);
        if path.is_file() {
            Some((kind, path))
        } else {
            debug!("📒️ The {kind} ledger has not been created yet");
            None
        }
    }
}
