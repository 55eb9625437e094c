//! Persistence of todo records.
//!
//! # Design
//! `TodoStore` is object safe so the server can pick a backend at startup and
//! hold it as `Box<dyn TodoStore>`. Every mutation takes the current instant
//! from the caller, which keeps timestamps deterministic under test.
//!
//! Both backends return records in the default order: `created_at`
//! descending, ties broken by `id` descending.

mod memory;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::listing::StatusFilter;
use crate::types::{Counts, NewTodo, Todo, TodoId};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait TodoStore: Send {
    fn insert(&mut self, new: &NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError>;

    fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// Overwrite the editable fields of `todo.id`. `None` when it is gone.
    fn update(&mut self, todo: &Todo, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError>;

    fn delete(&mut self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// Set `is_resolved` on every listed id that exists and return how many
    /// records were touched.
    fn set_resolved(
        &mut self,
        ids: &[TodoId],
        resolved: bool,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError>;

    fn list(&self, status: StatusFilter) -> Result<Vec<Todo>, StoreError>;

    fn counts(&self) -> Result<Counts, StoreError>;
}
