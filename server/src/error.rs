//! Mapping of failures to HTTP responses.
//!
//! Missing todos and bad page numbers are 404s. Everything else is logged
//! and shown as a generic 500 page without details.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use todo_core::{StoreError, TodoError};

const NOT_FOUND_PAGE: &str = concat!(
    "<!DOCTYPE html>\n<html><head><title>Not Found</title></head>",
    "<body><h1>Not Found</h1><p>The requested TODO does not exist.</p>",
    "<a href=\"/\">Back to list</a></body></html>",
);

const SERVER_ERROR_PAGE: &str = concat!(
    "<!DOCTYPE html>\n<html><head><title>Server Error</title></head>",
    "<body><h1>Server Error</h1><p>Something went wrong. Please try again later.</p>",
    "</body></html>",
);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error("template: {0}")]
    Template(#[from] tera::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Todo(TodoError::Store(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Todo(TodoError::NotFound(_) | TodoError::InvalidPage(_)) => {
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}
