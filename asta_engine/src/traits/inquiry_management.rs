use crate::{
    db_types::{Inquiry, InquiryKind, NewInquiry},
    traits::StorageError,
};

/// Storage for form inquiries. Contact and about inquiries share a shape but live in separate tables, selected by
/// [`InquiryKind`].
#[allow(async_fn_in_trait)]
pub trait InquiryManagement {
    /// Inserts a new inquiry and returns its server-assigned id.
    async fn insert_inquiry(&self, kind: InquiryKind, inquiry: NewInquiry) -> Result<i64, StorageError>;

    async fn fetch_inquiry(&self, kind: InquiryKind, id: i64) -> Result<Option<Inquiry>, StorageError>;

    /// All inquiries of the given kind, newest first.
    async fn fetch_inquiries(&self, kind: InquiryKind) -> Result<Vec<Inquiry>, StorageError>;
}
