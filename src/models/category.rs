//! Category model: a named group that owns tasks.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Maximum length, in characters, of a category name.
pub const CATEGORY_NAME_MAX_LEN: usize = 25;

/// Persisted category record.
///
/// The owned tasks are not carried on the struct; fetch them explicitly with
/// [`TaskRepo::list_for_category`](crate::persistence::task_repo::TaskRepo::list_for_category).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Category {
    /// Store-assigned identifier; immutable once assigned.
    pub id: i64,
    /// Unique display name.
    pub category_name: String,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.category_name)
    }
}

/// Editable category fields, written in full on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    /// New category name.
    pub category_name: String,
}

impl CategoryFields {
    /// Build the field set from a name.
    #[must_use]
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}
