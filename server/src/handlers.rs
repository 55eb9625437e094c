//! One handler per route of the todo pages.
//!
//! Each handler locks the store, runs one controller operation and hands the
//! outcome to [`AppState::respond`]. The lock is released before rendering.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use todo_core::controller;
use todo_core::{Notice, NoticeLevel, PageRequest, StatusFilter, TodoId, TodoInput};

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub page: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

/// The notice a redirect carried over in its query string.
///
/// Anyone can craft such a link, so a banner shown this way proves nothing
/// about what happened. It is autoescaped like any other text.
pub(crate) fn carried_notice(message: Option<&str>, level: Option<&str>) -> Option<Notice> {
    let message = message.filter(|m| !m.is_empty())?;
    Some(Notice {
        level: NoticeLevel::parse(level),
        message: message.to_string(),
    })
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let status = StatusFilter::parse(params.status.as_deref());
    let page = PageRequest::parse(params.page.as_deref())?;
    let outcome = {
        let store = state.store.lock().await;
        controller::list(&**store, status, page)?
    };
    let notice = carried_notice(params.notice.as_deref(), params.level.as_deref());
    state.respond(outcome, notice.as_ref())
}

pub async fn create_form(State(state): State<AppState>) -> Result<Response, AppError> {
    state.respond(controller::create_form(), None)
}

pub async fn create_todo(
    State(state): State<AppState>,
    Form(input): Form<TodoInput>,
) -> Result<Response, AppError> {
    let outcome = {
        let mut store = state.store.lock().await;
        controller::create(&mut **store, &input, Utc::now())?
    };
    state.respond(outcome, None)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    let outcome = {
        let store = state.store.lock().await;
        controller::edit_form(&**store, id)?
    };
    state.respond(outcome, None)
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Form(input): Form<TodoInput>,
) -> Result<Response, AppError> {
    let outcome = {
        let mut store = state.store.lock().await;
        controller::update(&mut **store, id, &input, Utc::now())?
    };
    state.respond(outcome, None)
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    let outcome = {
        let store = state.store.lock().await;
        controller::confirm_delete(&**store, id)?
    };
    state.respond(outcome, None)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    let outcome = {
        let mut store = state.store.lock().await;
        controller::delete(&mut **store, id)?
    };
    state.respond(outcome, None)
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    let outcome = {
        let mut store = state.store.lock().await;
        controller::toggle(&mut **store, id, Utc::now())?
    };
    state.respond(outcome, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carried_notice_needs_a_message() {
        assert_eq!(carried_notice(None, Some("warning")), None);
        assert_eq!(carried_notice(Some(""), None), None);
    }

    #[test]
    fn carried_notice_defaults_to_success() {
        let notice = carried_notice(Some("Saved"), None).unwrap();
        assert_eq!(notice, Notice::success("Saved"));
        let notice = carried_notice(Some("Careful"), Some("warning")).unwrap();
        assert_eq!(notice, Notice::warning("Careful"));
    }
}
