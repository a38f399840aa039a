//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` and are safe to
//! re-run on every startup.

use sqlx::SqlitePool;

use crate::models::category::CATEGORY_NAME_MAX_LEN;
use crate::models::task::TASK_NAME_MAX_LEN;
use crate::Result;

/// Apply the `category` and `task` table definitions.
///
/// The store enforces name uniqueness, required fields, name lengths,
/// canonical `YYYY-MM-DD` due dates, and the cascading foreign key from
/// `task.category_id` to `category.id`.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = format!(
        r"
CREATE TABLE IF NOT EXISTS category (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name   TEXT NOT NULL UNIQUE
                    CHECK(length(category_name) BETWEEN 1 AND {CATEGORY_NAME_MAX_LEN})
);

CREATE TABLE IF NOT EXISTS task (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    task_name        TEXT NOT NULL UNIQUE
                     CHECK(length(task_name) BETWEEN 1 AND {TASK_NAME_MAX_LEN}),
    task_description TEXT NOT NULL CHECK(length(task_description) > 0),
    is_urgent        INTEGER NOT NULL DEFAULT 0 CHECK(is_urgent IN (0, 1)),
    due_date         TEXT NOT NULL CHECK(date(due_date) IS due_date),
    category_id      INTEGER NOT NULL
                     REFERENCES category(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_task_category ON task(category_id);
"
    );

    sqlx::raw_sql(&ddl).execute(pool).await?;
    Ok(())
}
