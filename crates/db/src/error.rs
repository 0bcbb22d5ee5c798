//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// Another section already uses this `section_number`.
    #[error("section number {0} already exists")]
    DuplicateSectionNumber(i64),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// Map a write failure, turning a unique-index violation into
    /// [`DbError::DuplicateSectionNumber`].
    pub(crate) fn from_write(err: sqlx::Error, section_number: i64) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::DuplicateSectionNumber(section_number);
            }
        }
        Self::Sqlx(err)
    }
}
