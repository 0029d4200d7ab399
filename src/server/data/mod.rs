//! Database repository layer for all domain entities.
//!
//! Repositories are generic over `ConnectionTrait` so the same operations run on the
//! shared connection pool or inside a `DatabaseTransaction` opened by a service. They use
//! SeaORM entity models internally and return domain models from `server::model`.

pub mod channel;
pub mod request;
pub mod request_channel;


use sea_orm::{DbErr, SqlErr};

/// Whether a storage error is a unique or primary key violation.
///
/// Covers the composite link key and the one-draft-per-creator partial index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
