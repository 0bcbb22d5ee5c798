//! Section CRUD operations.
//!
//! [`SectionRepository`] is the contract consumed by higher layers;
//! [`SqliteSectionRepository`] implements it over a shared [`DbPool`].

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::{models::Section, DbError, DbPool};

/// Storage operations on the `sections` table.
///
/// Each call is a single statement executed on its own; nothing here opens a
/// transaction.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Return every section in storage order (no guaranteed sort).
    ///
    /// A row that cannot be decoded fails the whole call.
    async fn get_all(&self) -> Result<Vec<Section>, DbError>;

    /// Fetch a single section by its primary key.
    ///
    /// Returns `DbError::NotFound` if no row matches.
    async fn get(&self, id: i64) -> Result<Section, DbError>;

    /// Check whether a section with `section_number` is stored.
    ///
    /// `Ok(false)` means the number is free; `Err` means the check itself
    /// failed and nothing is known.
    async fn lookup(&self, section_number: i64) -> Result<bool, DbError>;

    /// Boolean form of [`lookup`](Self::lookup). A failed lookup counts as
    /// "does not exist".
    async fn exists(&self, section_number: i64) -> bool {
        match self.lookup(section_number).await {
            Ok(found) => found,
            Err(e) => {
                warn!(section_number, error = %e, "section lookup failed, reporting absent");
                false
            }
        }
    }

    /// Insert `section` (its `id` is ignored) and return the id assigned by
    /// storage.
    async fn save(&self, section: &Section) -> Result<i64, DbError>;

    /// Overwrite every column of the row matching `section.id`.
    ///
    /// Returns `DbError::NotFound` if no row was updated.
    async fn update(&self, section: &Section) -> Result<(), DbError>;

    /// Permanently delete a section by its primary key.
    ///
    /// Returns `DbError::NotFound` if no row was deleted.
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// [`SectionRepository`] backed by SQLite.
#[derive(Debug, Clone)]
pub struct SqliteSectionRepository {
    pool: DbPool,
}

impl SqliteSectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for SqliteSectionRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Section>, DbError> {
        let rows = sqlx::query_as::<_, Section>("SELECT * FROM sections")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Section, DbError> {
        let row = sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;

        Ok(row)
    }

    #[instrument(skip(self))]
    async fn lookup(&self, section_number: i64) -> Result<bool, DbError> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT section_number FROM sections WHERE section_number = ?",
        )
        .bind(section_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    #[instrument(skip(self, section), fields(section_number = section.section_number))]
    async fn save(&self, section: &Section) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO sections
                (section_number, current_temperature, minimum_temperature, current_capacity,
                 minimum_capacity, maximum_capacity, warehouse_id, product_type_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(section.section_number)
        .bind(section.current_temperature)
        .bind(section.minimum_temperature)
        .bind(section.current_capacity)
        .bind(section.minimum_capacity)
        .bind(section.maximum_capacity)
        .bind(section.warehouse_id)
        .bind(section.product_type_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, section.section_number))?;

        let id = result.last_insert_rowid();
        debug!(id, "section inserted");
        Ok(id)
    }

    #[instrument(skip(self, section), fields(id = section.id))]
    async fn update(&self, section: &Section) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE sections
            SET section_number = ?, current_temperature = ?, minimum_temperature = ?,
                current_capacity = ?, minimum_capacity = ?, maximum_capacity = ?,
                warehouse_id = ?, product_type_id = ?
            WHERE id = ?
            "#,
        )
        .bind(section.section_number)
        .bind(section.current_temperature)
        .bind(section.minimum_temperature)
        .bind(section.current_capacity)
        .bind(section.minimum_capacity)
        .bind(section.maximum_capacity)
        .bind(section.warehouse_id)
        .bind(section.product_type_id)
        .bind(section.id)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, section.section_number))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        debug!("section updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        debug!("section deleted");
        Ok(())
    }
}
