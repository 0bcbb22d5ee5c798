//! Repositories — one per table.
//!
//! Every repository holds a `DbPool` handed in at construction and returns
//! `Result<T, DbError>`. No business logic — pure SQL.

pub mod sections;
