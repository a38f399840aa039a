#![forbid(unsafe_code)]

//! Task manager: tasks grouped into categories, served as HTML forms over
//! a `SQLite` store.

pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod web;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
