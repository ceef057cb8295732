//! # Spreadsheet ledgers
//!
//! Every stored registration and inquiry is mirrored into a spreadsheet, one file per entity type. The ledgers are an
//! append-only projection of the database for the academy's staff, who prefer to work in a spreadsheet. They are never
//! reconciled with the database: rows are not updated or removed, even when the source row is later deleted.
//!
//! [`LedgerRecord`] is an ordered list of `(column header, value)` pairs. [`XlsxLedger`] is the [`LedgerWriter`]
//! implementation that stores them in `.xlsx` files.
//!
//! [`LedgerWriter`]: crate::traits::LedgerWriter
use std::fmt::Display;

use serde::{Deserialize, Serialize};

mod records;
mod xlsx;

pub use records::LEDGER_DATE_FORMAT;
pub use xlsx::XlsxLedger;

//--------------------------------------      LedgerKind      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerKind {
    Students,
    ContactMessages,
    AboutInquiries,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 3] = [LedgerKind::Students, LedgerKind::ContactMessages, LedgerKind::AboutInquiries];

    /// Resolves the short key used by the download endpoint (`students`, `contact` or `about`).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "students" => Some(Self::Students),
            "contact" => Some(Self::ContactMessages),
            "about" => Some(Self::AboutInquiries),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Students => "students.xlsx",
            Self::ContactMessages => "contact_messages.xlsx",
            Self::AboutInquiries => "about_inquiries.xlsx",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::ContactMessages => "Contact Messages",
            Self::AboutInquiries => "About Inquiries",
        }
    }
}

impl Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sheet_name())
    }
}

//--------------------------------------     LedgerValue      ---------------------------------------------------------
/// A single spreadsheet cell. Numbers are written as numeric cells so that they stay numeric when the ledger is read
/// back and rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerValue {
    Text(String),
    Number(f64),
    Empty,
}

impl LedgerValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, LedgerValue::Empty)
    }
}

impl Display for LedgerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerValue::Text(s) => write!(f, "{s}"),
            LedgerValue::Number(n) => write!(f, "{n}"),
            LedgerValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for LedgerValue {
    fn from(value: &str) -> Self {
        LedgerValue::Text(value.to_string())
    }
}

impl From<String> for LedgerValue {
    fn from(value: String) -> Self {
        LedgerValue::Text(value)
    }
}

impl From<f64> for LedgerValue {
    fn from(value: f64) -> Self {
        LedgerValue::Number(value)
    }
}

impl From<i64> for LedgerValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        LedgerValue::Number(value as f64)
    }
}

//--------------------------------------     LedgerRecord     ---------------------------------------------------------
/// One ledger row, as ordered `(header, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    fields: Vec<(String, LedgerValue)>,
}

impl LedgerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. Setting an existing key replaces its value in place, keeping the column order.
    pub fn with<K: Into<String>, V: Into<LedgerValue>>(mut self, key: K, value: V) -> Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&LedgerValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
