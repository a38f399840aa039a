//! Page templates compiled into the binary and rendered with `tera`.

use axum::response::Html;
use tera::{Context, Tera};

use crate::Result;

const PAGES: [(&str, &str); 7] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("tasks.html", include_str!("../../templates/tasks.html")),
    ("categories.html", include_str!("../../templates/categories.html")),
    ("add_category.html", include_str!("../../templates/add_category.html")),
    ("edit_category.html", include_str!("../../templates/edit_category.html")),
    ("add_task.html", include_str!("../../templates/add_task.html")),
    ("edit_task.html", include_str!("../../templates/edit_task.html")),
];

/// Registered template set. Output of `.html` templates is auto-escaped.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Parse and register every page template.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(PAGES)?;
        Ok(Self { tera })
    }

    /// Render `name` with `context` into an HTML response body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if the template is unknown or rendering fails.
    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>> {
        Ok(Html(self.tera.render(name, context)?))
    }
}
