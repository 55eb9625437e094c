//! Error types for the todo core.
//!
//! # Design
//! `NotFound` gets a dedicated variant because every id-addressed operation
//! has to tell "no such todo" apart from a broken store. Validation failures
//! are not errors of an operation: the controller turns them into a
//! re-rendered form, so `ValidationErrors` lives outside `TodoError`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::TodoId;

/// Failures returned by controller and listing operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The requested todo does not exist.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The requested page is not a number or is out of range.
    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the persistence layer. Always fatal for the request.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field error of one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message for `field`, if it was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
