//! SQLite backend for the ASTA engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
