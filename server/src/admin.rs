//! Operator pages: the searchable changelist and its bulk actions.

use axum::extract::{Query, State};
use axum::response::{Html, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use todo_core::admin::{self, parse_resolved_filter, AdminQuery, BulkAction, DateFilter};
use todo_core::TodoId;

use crate::error::AppError;
use crate::handlers::carried_notice;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    pub q: Option<String>,
    pub is_resolved: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

impl AdminParams {
    fn query(&self) -> AdminQuery {
        AdminQuery {
            search: self.q.clone().unwrap_or_default(),
            is_resolved: parse_resolved_filter(self.is_resolved.as_deref()),
            due_date: DateFilter::parse(self.due_date.as_deref()),
            created_at: DateFilter::parse_created(self.created_at.as_deref()),
        }
    }
}

pub async fn changelist(
    State(state): State<AppState>,
    Query(params): Query<AdminParams>,
) -> Result<Html<String>, AppError> {
    let query = params.query();
    let today = Utc::now().date_naive();
    let todos = {
        let store = state.store.lock().await;
        admin::changelist(&**store, &query, today)?
    };
    let notice = carried_notice(params.notice.as_deref(), params.level.as_deref());
    let html = state
        .templates
        .admin(&todos, &query, notice.as_ref(), today)?;
    Ok(Html(html))
}

/// Form fields `action` and any number of `selected` ids. Ids that do not
/// parse are dropped.
pub async fn bulk_action(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let action = fields
        .iter()
        .find(|(name, _)| name == "action")
        .map(|(_, value)| value.as_str());
    let selected: Vec<TodoId> = fields
        .iter()
        .filter(|(name, _)| name == "selected")
        .filter_map(|(_, value)| value.parse().ok())
        .collect();

    let outcome = {
        let mut store = state.store.lock().await;
        admin::run_action(&mut **store, BulkAction::parse(action), &selected, Utc::now())?
    };
    state.respond(outcome, None)
}
