use std::path::PathBuf;

use thiserror::Error;

use crate::ledger::{LedgerKind, LedgerRecord};

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Could not read ledger {0}. {1}")]
    ReadError(String, String),
    #[error("Could not write ledger {0}. {1}")]
    WriteError(String, String),
    #[error("Ledger I/O error. {0}")]
    IoError(String),
}

/// An append-only, ordered record store with one ledger per [`LedgerKind`].
///
/// Every appended record must be visible to every subsequent read, in insertion order. Rows are never modified or
/// removed once written.
#[allow(async_fn_in_trait)]
pub trait LedgerWriter {
    /// Appends `record` as the last row of the ledger, creating the ledger if it does not exist yet.
    async fn append(&self, kind: LedgerKind, record: LedgerRecord) -> Result<(), LedgerError>;

    /// Reads every row of the ledger, oldest first. A ledger that has not been created yet is empty.
    async fn read_all(&self, kind: LedgerKind) -> Result<Vec<LedgerRecord>, LedgerError>;

    /// Where the ledger lives on disk. The file may not exist yet.
    fn ledger_path(&self, kind: LedgerKind) -> PathBuf;
}
