//! `db` crate — persistence layer for warehouse sections.
//!
//! Provides a connection pool, the `Section` row struct, and the
//! [`SectionRepository`] over the `sections` table. No business logic lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::DbPool;
pub use error::DbError;
pub use models::Section;
pub use repository::sections::{SectionRepository, SqliteSectionRepository};
