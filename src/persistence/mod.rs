//! Persistence layer modules.

pub mod category_repo;
pub mod db;
pub mod schema;
pub mod task_repo;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
