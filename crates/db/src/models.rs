//! Row structs that map 1-to-1 onto database tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// sections
// ---------------------------------------------------------------------------

/// A warehouse storage section.
///
/// `id` is assigned by storage on insert and ignored by
/// [`SectionRepository::save`](crate::SectionRepository::save).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: i64,
    /// Business key, unique across the table.
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i64,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}
