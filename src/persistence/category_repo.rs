//! Category repository for `SQLite` persistence.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::models::category::{Category, CategoryFields};
use crate::models::task::Task;
use crate::{AppError, Result};

/// Repository for category records.
#[derive(Clone)]
pub struct CategoryRepo {
    db: Arc<SqlitePool>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    category_name: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            category_name: self.category_name,
        }
    }
}

impl CategoryRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Insert a new category and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConstraintViolation` if the name is empty, too
    /// long, or already taken, or `AppError::Db` if the insert fails.
    pub async fn create(&self, fields: &CategoryFields) -> Result<Category> {
        let result = sqlx::query("INSERT INTO category (category_name) VALUES (?1)")
            .bind(&fields.category_name)
            .execute(self.db.as_ref())
            .await?;

        let id = result.last_insert_rowid();
        debug!(category_id = id, "category created");
        Ok(Category {
            id,
            category_name: fields.category_name.clone(),
        })
    }

    /// Retrieve a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no category has this identifier.
    pub async fn get_by_id(&self, id: i64) -> Result<Category> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, category_name FROM category WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.db.as_ref())
                .await?;

        row.map(CategoryRow::into_category)
            .ok_or_else(|| AppError::NotFound(format!("category {id}")))
    }

    /// Resolve the category that owns `task`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the referenced category is gone.
    pub async fn get_for_task(&self, task: &Task) -> Result<Category> {
        self.get_by_id(task.category_id).await
    }

    /// List all categories ordered by name (ascending).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, category_name FROM category ORDER BY category_name ASC")
                .fetch_all(self.db.as_ref())
                .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    /// Overwrite every editable field of an existing category.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the category does not exist, or
    /// `AppError::ConstraintViolation` if the new name is rejected.
    pub async fn update(&self, id: i64, fields: &CategoryFields) -> Result<Category> {
        let result = sqlx::query("UPDATE category SET category_name = ?1 WHERE id = ?2")
            .bind(&fields.category_name)
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("category {id}")));
        }

        debug!(category_id = id, "category updated");
        self.get_by_id(id).await
    }

    /// Delete a category together with every task that references it.
    ///
    /// Both deletes run in one transaction; when the category does not
    /// exist nothing is committed.
    ///
    /// Returns the number of tasks removed with the category.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the category does not exist, or
    /// `AppError::Db` if either delete or the commit fails.
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let mut tx = self.db.begin().await?;

        let tasks = sqlx::query("DELETE FROM task WHERE category_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM category WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("category {id}")));
        }

        tx.commit().await?;
        info!(category_id = id, tasks_removed = tasks, "category deleted");
        Ok(tasks)
    }

    /// Count stored categories.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM category")
            .fetch_one(self.db.as_ref())
            .await?;
        u64::try_from(count).map_err(|err| AppError::Db(format!("invalid count: {err}")))
    }
}
