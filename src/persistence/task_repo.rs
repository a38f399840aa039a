//! Task repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::models::task::{Task, TaskFields, TaskWithCategory};
use crate::{AppError, Result};

/// Repository for task records.
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<SqlitePool>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    task_name: String,
    task_description: String,
    is_urgent: i64,
    due_date: String,
    category_id: i64,
}

impl TaskRow {
    fn into_task(self) -> Result<Task> {
        let due_date = parse_due_date(&self.due_date)?;
        Ok(Task {
            id: self.id,
            task_name: self.task_name,
            task_description: self.task_description,
            is_urgent: self.is_urgent != 0,
            due_date,
            category_id: self.category_id,
        })
    }
}

/// Task row joined with its category name.
#[derive(sqlx::FromRow)]
struct TaskCategoryRow {
    #[sqlx(flatten)]
    task: TaskRow,
    category_name: String,
}

fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| AppError::Db(format!("invalid due_date {s:?}: {e}")))
}

const SELECT_TASK: &str =
    "SELECT id, task_name, task_description, is_urgent, due_date, category_id FROM task";

impl TaskRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Insert a new task and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConstraintViolation` if a required field is
    /// missing, the name is taken or too long, the due date is malformed,
    /// or the category does not exist.
    pub async fn create(&self, fields: &TaskFields) -> Result<Task> {
        let result = sqlx::query(
            "INSERT INTO task (task_name, task_description, is_urgent, due_date, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&fields.task_name)
        .bind(&fields.task_description)
        .bind(i64::from(fields.is_urgent))
        .bind(&fields.due_date)
        .bind(fields.category_id)
        .execute(self.db.as_ref())
        .await?;

        let id = result.last_insert_rowid();
        debug!(task_id = id, category_id = ?fields.category_id, "task created");
        self.get_by_id(id).await
    }

    /// Retrieve a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no task has this identifier.
    pub async fn get_by_id(&self, id: i64) -> Result<Task> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{SELECT_TASK} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.ok_or_else(|| AppError::NotFound(format!("task {id}")))?
            .into_task()
    }

    /// List all tasks ordered by identifier (ascending).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!("{SELECT_TASK} ORDER BY id ASC"))
            .fetch_all(self.db.as_ref())
            .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// List all tasks with their category names, ordered by task identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_with_category(&self) -> Result<Vec<TaskWithCategory>> {
        let rows: Vec<TaskCategoryRow> = sqlx::query_as(
            "SELECT t.id AS id, t.task_name AS task_name,
                    t.task_description AS task_description, t.is_urgent AS is_urgent,
                    t.due_date AS due_date, t.category_id AS category_id,
                    c.category_name AS category_name
             FROM task t
             JOIN category c ON c.id = t.category_id
             ORDER BY t.id ASC",
        )
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TaskWithCategory {
                    task: row.task.into_task()?,
                    category_name: row.category_name,
                })
            })
            .collect()
    }

    /// List the tasks owned by one category, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for_category(&self, category_id: i64) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("{SELECT_TASK} WHERE category_id = ?1 ORDER BY id ASC"))
                .bind(category_id)
                .fetch_all(self.db.as_ref())
                .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Overwrite every editable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the task does not exist, or
    /// `AppError::ConstraintViolation` if the new values are rejected.
    pub async fn update(&self, id: i64, fields: &TaskFields) -> Result<Task> {
        let result = sqlx::query(
            "UPDATE task
             SET task_name = ?1, task_description = ?2, is_urgent = ?3,
                 due_date = ?4, category_id = ?5
             WHERE id = ?6",
        )
        .bind(&fields.task_name)
        .bind(&fields.task_description)
        .bind(i64::from(fields.is_urgent))
        .bind(&fields.due_date)
        .bind(fields.category_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id}")));
        }

        debug!(task_id = id, "task updated");
        self.get_by_id(id).await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the task does not exist.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM task WHERE id = ?1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id}")));
        }

        debug!(task_id = id, "task deleted");
        Ok(())
    }

    /// Count stored tasks.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM task")
            .fetch_one(self.db.as_ref())
            .await?;
        u64::try_from(count).map_err(|err| AppError::Db(format!("invalid count: {err}")))
    }
}
