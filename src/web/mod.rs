//! HTTP surface: shared state, routing, rendering, and request handlers.

pub mod handlers;
pub mod render;
pub mod server;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::GlobalConfig;
use crate::{AppError, Result};

use render::Templates;

/// State shared by every request handler.
///
/// The store handle is injected here rather than held globally so the
/// router can be built against any pool, including in-memory ones.
pub struct AppState {
    /// Effective configuration.
    pub config: Arc<GlobalConfig>,
    /// Connection pool for the task store.
    pub db: Arc<SqlitePool>,
    /// Registered page templates.
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Build state around an open pool, registering the page templates.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if a template fails to parse.
    pub fn new(config: Arc<GlobalConfig>, db: Arc<SqlitePool>) -> Result<Self> {
        Ok(Self {
            config,
            db,
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Parse an `{id}` path segment.
///
/// Only plain positive decimal integers name an entity; anything else is
/// reported as not found.
pub(crate) fn parse_id(kind: &str, raw: &str) -> Result<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound(format!("{kind} {raw}")));
    }
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(format!("{kind} {raw}")))
}
