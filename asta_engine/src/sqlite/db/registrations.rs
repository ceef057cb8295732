use sqlx::SqliteConnection;

use crate::{
    db_types::{NewRegistration, Registration},
    traits::StorageError,
};

/// Inserts a new registration and returns the id that SQLite assigned to it.
///
/// The statement is stepped to completion with `fetch_all`. Stopping after the first `RETURNING` row leaves the write
/// uncommitted, and other pooled connections would not see the new row.
pub async fn insert_registration(
    registration: NewRegistration,
    conn: &mut SqliteConnection,
) -> Result<i64, StorageError> {
    let NewRegistration { registrant, payment_id, payment_status } = registration;
    let rows: Vec<(i64,)> = sqlx::query_as(
        r#"INSERT INTO students (name, email, phone, course, payment_id, payment_status, amount)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id"#,
    )
    .bind(registrant.name)
    .bind(registrant.email)
    .bind(registrant.phone)
    .bind(registrant.course)
    .bind(payment_id)
    .bind(payment_status)
    .bind(registrant.amount)
    .fetch_all(conn)
    .await?;
    inserted_id(rows)
}

/// The single id returned by an `INSERT .. RETURNING id` statement.
pub(crate) fn inserted_id(rows: Vec<(i64,)>) -> Result<i64, StorageError> {
    rows.into_iter()
        .next()
        .map(|(id,)| id)
        .ok_or_else(|| StorageError::DatabaseError("The insert did not return an id".to_string()))
}

pub async fn fetch_registration(id: i64, conn: &mut SqliteConnection) -> Result<Option<Registration>, StorageError> {
    let registration = sqlx::query_as("SELECT * FROM students WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(registration)
}

/// Returns `true` if a row was deleted.
pub async fn delete_registration(id: i64, conn: &mut SqliteConnection) -> Result<bool, StorageError> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_registrations(conn: &mut SqliteConnection) -> Result<Vec<Registration>, StorageError> {
    let registrations = sqlx::query_as("SELECT * FROM students ORDER BY registration_date DESC, id DESC")
        .fetch_all(conn)
        .await?;
    Ok(registrations)
}
