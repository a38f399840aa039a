//! Task list, create, edit, and delete handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tera::Context;
use tracing::info;

use crate::models::category::Category;
use crate::models::task::{Task, TaskFields};
use crate::persistence::category_repo::CategoryRepo;
use crate::persistence::task_repo::TaskRepo;
use crate::web::{parse_id, AppState};
use crate::Result;

/// Submitted task form.
///
/// Every field is taken as submitted text so that missing or malformed
/// values reach the store and fail its constraints there.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    /// Requested task name.
    #[serde(default)]
    pub task_name: String,
    /// Task description.
    #[serde(default)]
    pub task_description: String,
    /// Checkbox value; absent when unchecked.
    pub is_urgent: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: String,
    /// Selected category identifier.
    #[serde(default)]
    pub category_id: String,
}

/// Checkbox semantics: any non-empty submitted value means checked.
fn is_checked(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl From<TaskForm> for TaskFields {
    fn from(form: TaskForm) -> Self {
        Self {
            is_urgent: is_checked(form.is_urgent.as_deref()),
            task_name: form.task_name,
            task_description: form.task_description,
            due_date: form.due_date,
            // An unusable id binds as NULL and fails the required-field rule.
            category_id: form.category_id.trim().parse().ok(),
        }
    }
}

async fn categories(state: &AppState) -> Result<Vec<Category>> {
    CategoryRepo::new(Arc::clone(&state.db)).list_all().await
}

fn render_edit(state: &AppState, task: &Task, categories: &[Category]) -> Result<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("task", task);
    ctx.insert("categories", categories);
    state.templates.render("edit_task.html", &ctx)
}

/// `GET /` — all tasks by identifier, with category names.
///
/// # Errors
///
/// Returns an error response if the store query or rendering fails.
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let tasks = TaskRepo::new(Arc::clone(&state.db))
        .list_with_category()
        .await?;
    let mut ctx = Context::new();
    ctx.insert("tasks", &tasks);
    state.templates.render("tasks.html", &ctx)
}

/// `GET /add_task` — empty form with the category choices.
///
/// # Errors
///
/// Returns an error response if the store query or rendering fails.
pub async fn add_task_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("categories", &categories(&state).await?);
    state.templates.render("add_task.html", &ctx)
}

/// `POST /add_task` — persist the submission and go home.
///
/// # Errors
///
/// Returns `422` if the store rejects the submitted values.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect> {
    let task = TaskRepo::new(Arc::clone(&state.db))
        .create(&form.into())
        .await?;
    info!(task_id = task.id, category_id = task.category_id, "task added");
    Ok(Redirect::to("/"))
}

/// `GET /edit_task/{id}` — form populated with the stored values.
///
/// # Errors
///
/// Returns `404` if the task does not exist.
pub async fn edit_task_form(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id("task", &raw_id)?;
    let task = TaskRepo::new(Arc::clone(&state.db)).get_by_id(id).await?;
    render_edit(&state, &task, &categories(&state).await?)
}

/// `POST /edit_task/{id}` — replace every field, then re-render the form.
///
/// # Errors
///
/// Returns `404` if the task does not exist or `422` if the store rejects
/// the new values.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Form(form): Form<TaskForm>,
) -> Result<Html<String>> {
    let id = parse_id("task", &raw_id)?;
    let repo = TaskRepo::new(Arc::clone(&state.db));
    repo.get_by_id(id).await?;
    let task = repo.update(id, &form.into()).await?;
    info!(task_id = id, "task edited");
    render_edit(&state, &task, &categories(&state).await?)
}

/// `GET /delete_task/{id}` — delete the task and go home.
///
/// # Errors
///
/// Returns `404` if the task does not exist.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Redirect> {
    let id = parse_id("task", &raw_id)?;
    TaskRepo::new(Arc::clone(&state.db)).delete(id).await?;
    Ok(Redirect::to("/"))
}
