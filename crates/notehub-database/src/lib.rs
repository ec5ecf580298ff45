//! # notehub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all NoteHub entities. Repositories own their
//! SQL; conditional updates are expressed as `WHERE` guards and checked
//! through `rows_affected()`.

pub mod connection;
pub mod migration;
pub mod repositories;
