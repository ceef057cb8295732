//! `SqliteDatabase` is a concrete implementation of an ASTA engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the storage traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{inquiries, new_pool, registrations};
use crate::{
    db_types::{Inquiry, InquiryKind, NewInquiry, NewRegistration, Registration},
    traits::{InquiryManagement, RegistrationManagement, StorageError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({})", self.url)
    }
}

impl RegistrationManagement for SqliteDatabase {
    async fn insert_registration(&self, registration: NewRegistration) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let id = registrations::insert_registration(registration, &mut conn).await?;
        debug!("🗃️ Registration #{id} has been saved in the DB");
        Ok(id)
    }

    async fn fetch_registration(&self, id: i64) -> Result<Option<Registration>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        registrations::fetch_registration(id, &mut conn).await
    }

    async fn delete_registration(&self, id: i64) -> Result<bool, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = registrations::delete_registration(id, &mut conn).await?;
        debug!("🗃️ Delete registration #{id}: {}", if deleted { "removed" } else { "no such row" });
        Ok(deleted)
    }

    async fn fetch_registrations(&self) -> Result<Vec<Registration>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        registrations::fetch_registrations(&mut conn).await
    }
}

impl InquiryManagement for SqliteDatabase {
    async fn insert_inquiry(&self, kind: InquiryKind, inquiry: NewInquiry) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let id = inquiries::insert_inquiry(kind, inquiry, &mut conn).await?;
        debug!("🗃️ New {kind} #{id} has been saved in the DB");
        Ok(id)
    }

    async fn fetch_inquiry(&self, kind: InquiryKind, id: i64) -> Result<Option<Inquiry>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        inquiries::fetch_inquiry(kind, id, &mut conn).await
    }

    async fn fetch_inquiries(&self, kind: InquiryKind) -> Result<Vec<Inquiry>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        inquiries::fetch_inquiries(kind, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Opens the database at `url`, creating it if it does not exist. Call [`Self::run_migrations`] before use.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Creates any missing tables.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::DatabaseError(format!("Migrations failed. {e}")))?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("🗃️ Database connection pool closed");
    }
}
