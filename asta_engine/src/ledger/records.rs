use super::{LedgerRecord, LedgerValue};
use crate::db_types::{Inquiry, InquiryKind, Registration};

/// How timestamps are written into ledgers and emails.
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

impl From<&Registration> for LedgerRecord {
    fn from(r: &Registration) -> Self {
        LedgerRecord::new()
            .with("ID", r.id)
            .with("Name", r.name.as_str())
            .with("Email", r.email.as_str())
            .with("Phone", r.phone.as_str())
            .with("Course", r.course.as_str())
            .with("Amount", r.amount.as_f64())
            .with("Payment ID", r.payment_id.as_deref().map(LedgerValue::from).unwrap_or(LedgerValue::Empty))
            .with("Payment Status", r.payment_status.to_string())
            .with("Registration Date", r.registration_date.format(LEDGER_DATE_FORMAT).to_string())
    }
}

impl LedgerRecord {
    /// Contact messages carry a phone column (`N/A` when none was given); about inquiries do not.
    pub fn from_inquiry(kind: InquiryKind, inquiry: &Inquiry) -> Self {
        let record = LedgerRecord::new()
            .with("ID", inquiry.id)
            .with("Name", inquiry.name.as_str())
            .with("Email", inquiry.email.as_str());
        let record = match kind {
            InquiryKind::Contact => record.with("Phone", inquiry.phone.as_deref().unwrap_or("N/A")),
            InquiryKind::About => record,
        };
        record
            .with("Subject", inquiry.subject.as_str())
            .with("Message", inquiry.message.as_str())
            .with("Submission Date", inquiry.submission_date.format(LEDGER_DATE_FORMAT).to_string())
    }
}
