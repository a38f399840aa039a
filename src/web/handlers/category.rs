//! Category list, create, edit, and delete handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tera::Context;
use tracing::info;

use crate::models::category::{Category, CategoryFields};
use crate::persistence::category_repo::CategoryRepo;
use crate::web::{parse_id, AppState};
use crate::Result;

/// Submitted category form. A missing field arrives as an empty string and
/// is rejected by the store.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    /// Requested category name.
    #[serde(default)]
    pub category_name: String,
}

impl From<CategoryForm> for CategoryFields {
    fn from(form: CategoryForm) -> Self {
        Self {
            category_name: form.category_name,
        }
    }
}

fn repo(state: &AppState) -> CategoryRepo {
    CategoryRepo::new(Arc::clone(&state.db))
}

fn render_edit(state: &AppState, category: &Category) -> Result<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("category", category);
    state.templates.render("edit_category.html", &ctx)
}

/// `GET /categories` — all categories by name.
///
/// # Errors
///
/// Returns an error response if the store query or rendering fails.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let categories = repo(&state).list_all().await?;
    let mut ctx = Context::new();
    ctx.insert("categories", &categories);
    state.templates.render("categories.html", &ctx)
}

/// `GET /add_category` — empty form.
///
/// # Errors
///
/// Returns an error response if rendering fails.
pub async fn add_category_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    state.templates.render("add_category.html", &Context::new())
}

/// `POST /add_category` — persist the submission and go to the list.
///
/// # Errors
///
/// Returns `422` if the store rejects the submitted name.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect> {
    let category = repo(&state).create(&form.into()).await?;
    info!(category_id = category.id, "category added");
    Ok(Redirect::to("/categories"))
}

/// `GET /edit_category/{id}` — form populated with the stored values.
///
/// # Errors
///
/// Returns `404` if the category does not exist.
pub async fn edit_category_form(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>> {
    let id = parse_id("category", &raw_id)?;
    let category = repo(&state).get_by_id(id).await?;
    render_edit(&state, &category)
}

/// `POST /edit_category/{id}` — replace every field, then re-render the form.
///
/// # Errors
///
/// Returns `404` if the category does not exist or `422` if the store
/// rejects the new values.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Result<Html<String>> {
    let id = parse_id("category", &raw_id)?;
    let repo = repo(&state);
    repo.get_by_id(id).await?;
    let category = repo.update(id, &form.into()).await?;
    info!(category_id = id, "category edited");
    render_edit(&state, &category)
}

/// `GET /delete_category/{id}` — delete the category and its tasks.
///
/// # Errors
///
/// Returns `404` if the category does not exist.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Redirect> {
    let id = parse_id("category", &raw_id)?;
    repo(&state).delete(id).await?;
    Ok(Redirect::to("/categories"))
}
