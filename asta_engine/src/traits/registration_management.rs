use thiserror::Error;

use crate::db_types::{NewRegistration, Registration};

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

/// Storage for paid course registrations.
///
/// There is no uniqueness constraint on the payment id: storing the same payment twice creates two rows.
#[allow(async_fn_in_trait)]
pub trait RegistrationManagement {
    /// Inserts a new registration and returns its server-assigned id.
    async fn insert_registration(&self, registration: NewRegistration) -> Result<i64, StorageError>;

    /// Fetches a single registration by id. Returns `None` if it does not exist.
    async fn fetch_registration(&self, id: i64) -> Result<Option<Registration>, StorageError>;

    /// Deletes a registration. Returns `true` if a row was removed.
    async fn delete_registration(&self, id: i64) -> Result<bool, StorageError>;

    /// All registrations, newest first.
    async fn fetch_registrations(&self) -> Result<Vec<Registration>, StorageError>;
}
