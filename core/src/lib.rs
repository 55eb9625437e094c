//! Domain core for the todo tracker.
//!
//! # Overview
//! Holds the todo record, form validation, the filtered and paginated list,
//! the request-level operations and the operator bulk actions, plus the
//! stores that persist todos. No HTTP types appear here; the server crate
//! maps [`controller::Outcome`] values to responses.
//!
//! # Design
//! - Operations take the current instant or date as an argument. Only the
//!   server reads the clock, so everything here is deterministic under test.
//! - Persistence sits behind the object-safe [`TodoStore`] trait with an
//!   in-memory and a SQLite backend.
//! - Notifications are values inside an [`Outcome`], never ambient state.

pub mod admin;
pub mod controller;
pub mod error;
pub mod form;
pub mod listing;
pub mod store;
pub mod types;

pub use controller::{Notice, NoticeLevel, Outcome, View};
pub use error::{StoreError, TodoError, ValidationErrors};
pub use listing::{PageRequest, StatusFilter};
pub use store::{MemoryStore, SqliteStore, TodoStore};
pub use types::{Counts, NewTodo, Todo, TodoId, TodoInput};
