//! Contact messages and about-page inquiries share a schema, so the queries here are parameterised over the table
//! name. The name always comes from [`InquiryKind::table_name`], never from user input.
use sqlx::SqliteConnection;

use super::registrations::inserted_id;
use crate::{
    db_types::{Inquiry, InquiryKind, NewInquiry},
    traits::StorageError,
};

pub async fn insert_inquiry(
    kind: InquiryKind,
    inquiry: NewInquiry,
    conn: &mut SqliteConnection,
) -> Result<i64, StorageError> {
    let sql = format!(
        "INSERT INTO {} (name, email, phone, subject, message) VALUES ($1, $2, $3, $4, $5) RETURNING id",
        kind.table_name()
    );
    let rows: Vec<(i64,)> = sqlx::query_as(&sql)
        .bind(inquiry.name)
        .bind(inquiry.email)
        .bind(inquiry.phone)
        .bind(inquiry.subject)
        .bind(inquiry.message)
        .fetch_all(conn)
        .await?;
    inserted_id(rows)
}

pub async fn fetch_inquiry(
    kind: InquiryKind,
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Inquiry>, StorageError> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", kind.table_name());
    let inquiry = sqlx::query_as(&sql).bind(id).fetch_optional(conn).await?;
    Ok(inquiry)
}

pub async fn fetch_inquiries(kind: InquiryKind, conn: &mut SqliteConnection) -> Result<Vec<Inquiry>, StorageError> {
    let sql = format!("SELECT * FROM {} ORDER BY submission_date DESC, id DESC", kind.table_name());
    let inquiries = sqlx::query_as(&sql).fetch_all(conn).await?;
    Ok(inquiries)
}
