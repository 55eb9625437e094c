//! HTTP front end for the todo tracker.
//!
//! # Overview
//! An axum router with one handler per page, server-rendered HTML through
//! Tera, and the store chosen at startup behind a single async mutex.
//!
//! # Design
//! - Handlers are thin: lock, call one `todo_core` operation, respond.
//! - A redirect's notice travels in the `Location` query string and is shown
//!   by the page it lands on. There is no session or flash storage.
//! - Successful writes answer `302 Found`, validation failures re-render the
//!   form with `200 OK`.

pub mod admin;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use todo_core::{MemoryStore, Notice, Outcome, SqliteStore, TodoStore};
use tower_http::trace::TraceLayer;

use crate::config::{Config, Database};
use crate::error::AppError;
use crate::render::Templates;

pub type Db = Arc<Mutex<Box<dyn TodoStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Db,
    templates: Arc<Templates>,
}

impl AppState {
    pub fn new(store: Box<dyn TodoStore>) -> Result<Self, AppError> {
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            templates: Arc::new(Templates::new()?),
        })
    }

    pub fn in_memory() -> Result<Self, AppError> {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.database {
            Database::Memory => Self::in_memory(),
            Database::Sqlite(path) => Self::new(Box::new(SqliteStore::open(path)?)),
        }
    }

    /// Turn a controller outcome into a response: a rendered page or a
    /// `302 Found` whose location carries the notice.
    pub fn respond(&self, outcome: Outcome, notice: Option<&Notice>) -> Result<Response, AppError> {
        match outcome {
            Outcome::Render(view) => {
                let today = Utc::now().date_naive();
                let html = self.templates.view(&view, notice, today)?;
                Ok(Html(html).into_response())
            }
            Outcome::Redirect { location, notice } => Ok(found(location, notice.as_ref())),
        }
    }
}

fn found(location: &str, notice: Option<&Notice>) -> Response {
    let target = match notice {
        Some(notice) => {
            let query = [
                ("notice", notice.message.as_str()),
                ("level", notice.level.as_str()),
            ];
            match serde_urlencoded::to_string(query) {
                Ok(query) => format!("{location}?{query}"),
                Err(_) => location.to_string(),
            }
        }
        None => location.to_string(),
    };
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_todos))
        .route(
            "/create/",
            get(handlers::create_form).post(handlers::create_todo),
        )
        .route(
            "/{id}/edit/",
            get(handlers::edit_form).post(handlers::update_todo),
        )
        .route(
            "/{id}/delete/",
            get(handlers::confirm_delete).post(handlers::delete_todo),
        )
        .route("/{id}/toggle/", post(handlers::toggle_todo))
        .route("/admin/", get(admin::changelist).post(admin::bulk_action))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_without_notice_is_bare() {
        let resp = found("/", None);
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/");
    }

    #[test]
    fn redirect_encodes_the_notice() {
        let notice = Notice::success("TODO \"Walk dog\" created successfully!");
        let resp = found("/", Some(&notice));
        assert_eq!(
            resp.headers()[header::LOCATION],
            "/?notice=TODO+%22Walk+dog%22+created+successfully%21&level=success"
        );
    }

    #[test]
    fn sqlite_config_opens_a_file_store() {
        let path = std::env::temp_dir().join(format!("todo-server-{}.sqlite", std::process::id()));
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database: Database::Sqlite(path.clone()),
        };
        assert!(AppState::from_config(&config).is_ok());
        std::fs::remove_file(&path).unwrap();
    }
}
