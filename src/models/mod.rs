//! Domain model module declarations.

pub mod category;
pub mod task;

pub use category::{Category, CategoryFields};
pub use task::{Task, TaskFields, TaskWithCategory};
