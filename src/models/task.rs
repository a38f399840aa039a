//! Task model and its write payload.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

/// Maximum length, in characters, of a task name.
pub const TASK_NAME_MAX_LEN: usize = 50;

/// Persisted task record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned identifier; immutable once assigned.
    pub id: i64,
    /// Unique task name.
    pub task_name: String,
    /// Free-form description.
    pub task_description: String,
    /// Urgency flag.
    pub is_urgent: bool,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
    /// Owning category. Resolve with
    /// [`CategoryRepo::get_for_task`](crate::persistence::category_repo::CategoryRepo::get_for_task).
    pub category_id: i64,
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let urgent = if self.is_urgent { "True" } else { "False" };
        write!(
            f,
            "#{} - Task: {} | Urgent: {urgent}",
            self.id, self.task_name
        )
    }
}

/// A task paired with the name of its owning category, for list views.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskWithCategory {
    /// The task itself.
    #[serde(flatten)]
    pub task: Task,
    /// Name of the category referenced by `task.category_id`.
    pub category_name: String,
}

/// Editable task fields, written in full on create and update.
///
/// Values are carried as submitted; the store rejects anything that breaks
/// its constraints. `due_date` must be a `YYYY-MM-DD` calendar date and a
/// `None` category is refused as a missing required field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    /// Unique task name.
    pub task_name: String,
    /// Free-form description.
    pub task_description: String,
    /// Urgency flag; `false` unless set.
    pub is_urgent: bool,
    /// Due date in `YYYY-MM-DD` form.
    pub due_date: String,
    /// Owning category identifier.
    pub category_id: Option<i64>,
}

impl TaskFields {
    /// Build a non-urgent field set.
    #[must_use]
    pub fn new(
        task_name: impl Into<String>,
        task_description: impl Into<String>,
        due_date: impl Into<String>,
        category_id: i64,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            task_description: task_description.into(),
            is_urgent: false,
            due_date: due_date.into(),
            category_id: Some(category_id),
        }
    }

    /// Set the urgency flag.
    #[must_use]
    pub fn urgent(mut self, is_urgent: bool) -> Self {
        self.is_urgent = is_urgent;
        self
    }
}
