//! Request-level todo operations.
//!
//! # Design
//! Each operation returns an [`Outcome`]: either a view to render or a
//! redirect carrying an optional [`Notice`]. Nothing is stashed in ambient
//! state; the HTTP layer decides how a notice reaches the next page.
//! Validation failures are an ordinary outcome (the form again, with
//! errors). Missing ids are `TodoError::NotFound`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{TodoError, ValidationErrors};
use crate::form::{validate_create, validate_update};
use crate::listing::{self, Page, PageRequest, StatusFilter};
use crate::store::TodoStore;
use crate::types::{Counts, Todo, TodoId, TodoInput};

pub const LIST_LOCATION: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

impl NoticeLevel {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("warning") => NoticeLevel::Warning,
            _ => NoticeLevel::Success,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
        }
    }
}

/// A message for the user about what just happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub page: Page<Todo>,
    pub current_filter: StatusFilter,
    pub counts: Counts,
}

/// The create/edit form. `todo` is set when editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub todo: Option<Todo>,
    pub values: TodoInput,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List(ListView),
    Form(FormView),
    ConfirmDelete(Todo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    Redirect {
        location: &'static str,
        notice: Option<Notice>,
    },
}

impl Outcome {
    pub fn redirect(location: &'static str, notice: Notice) -> Self {
        Outcome::Redirect {
            location,
            notice: Some(notice),
        }
    }
}

fn existing(store: &dyn TodoStore, id: TodoId) -> Result<Todo, TodoError> {
    store.get(id)?.ok_or(TodoError::NotFound(id))
}

pub fn list(
    store: &dyn TodoStore,
    status: StatusFilter,
    page: PageRequest,
) -> Result<Outcome, TodoError> {
    let listing = listing::list(store, status, page)?;
    Ok(Outcome::Render(View::List(ListView {
        page: listing.page,
        current_filter: status,
        counts: listing.counts,
    })))
}

pub fn create_form() -> Outcome {
    Outcome::Render(View::Form(FormView {
        todo: None,
        values: TodoInput::default(),
        errors: ValidationErrors::new(),
    }))
}

pub fn create(
    store: &mut dyn TodoStore,
    input: &TodoInput,
    now: DateTime<Utc>,
) -> Result<Outcome, TodoError> {
    let new = match validate_create(input) {
        Ok(new) => new,
        Err(errors) => {
            return Ok(Outcome::Render(View::Form(FormView {
                todo: None,
                values: input.clone(),
                errors,
            })))
        }
    };
    let todo = store.insert(&new, now)?;
    tracing::info!(id = todo.id, title = %todo.title, "todo created");
    Ok(Outcome::redirect(
        LIST_LOCATION,
        Notice::success(format!("TODO \"{todo}\" created successfully!")),
    ))
}

pub fn edit_form(store: &dyn TodoStore, id: TodoId) -> Result<Outcome, TodoError> {
    let todo = existing(store, id)?;
    Ok(Outcome::Render(View::Form(FormView {
        values: TodoInput::from(&todo),
        todo: Some(todo),
        errors: ValidationErrors::new(),
    })))
}

pub fn update(
    store: &mut dyn TodoStore,
    id: TodoId,
    input: &TodoInput,
    now: DateTime<Utc>,
) -> Result<Outcome, TodoError> {
    let current = existing(store, id)?;
    let edited = match validate_update(&current, input) {
        Ok(edited) => edited,
        Err(errors) => {
            return Ok(Outcome::Render(View::Form(FormView {
                todo: Some(current),
                values: input.clone(),
                errors,
            })))
        }
    };
    let todo = store.update(&edited, now)?.ok_or(TodoError::NotFound(id))?;
    tracing::info!(id, resolved = todo.is_resolved, "todo updated");
    Ok(Outcome::redirect(
        LIST_LOCATION,
        Notice::success(format!("TODO \"{todo}\" updated successfully!")),
    ))
}

pub fn confirm_delete(store: &dyn TodoStore, id: TodoId) -> Result<Outcome, TodoError> {
    Ok(Outcome::Render(View::ConfirmDelete(existing(store, id)?)))
}

pub fn delete(store: &mut dyn TodoStore, id: TodoId) -> Result<Outcome, TodoError> {
    let todo = store.delete(id)?.ok_or(TodoError::NotFound(id))?;
    tracing::info!(id, "todo deleted");
    Ok(Outcome::redirect(
        LIST_LOCATION,
        Notice::success(format!("TODO \"{todo}\" deleted successfully!")),
    ))
}

pub fn toggle(
    store: &mut dyn TodoStore,
    id: TodoId,
    now: DateTime<Utc>,
) -> Result<Outcome, TodoError> {
    let mut todo = existing(store, id)?;
    todo.is_resolved = !todo.is_resolved;
    let todo = store.update(&todo, now)?.ok_or(TodoError::NotFound(id))?;
    let status = if todo.is_resolved { "completed" } else { "reopened" };
    tracing::info!(id, status, "todo toggled");
    Ok(Outcome::redirect(
        LIST_LOCATION,
        Notice::success(format!("TODO \"{todo}\" marked as {status}!")),
    ))
}
