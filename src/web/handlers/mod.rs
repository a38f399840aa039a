//! Request handlers, one module per entity.
//!
//! Create and delete redirect to the entity's list view; a successful edit
//! re-renders the edit form with the stored values.

pub mod category;
pub mod task;
