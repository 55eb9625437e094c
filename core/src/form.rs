//! Validation of submitted todo forms.
//!
//! `validate_create` and `validate_update` are independent entry points. The
//! fields they have in common go through [`clean_fields`]; only the update
//! path looks at `is_resolved`.

use chrono::NaiveDate;

use crate::error::ValidationErrors;
use crate::types::{NewTodo, Todo, TodoInput};

pub const TITLE_MAX_CHARS: usize = 200;

const REQUIRED: &str = "This field is required.";
const INVALID_DATE: &str = "Enter a valid date.";

/// Formats tried in order when parsing a due date. `%y` comes before `%Y`
/// because chrono's `%Y` also accepts a two-digit year.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%d %b, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

struct CleanFields {
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
}

/// Validate a create submission. `is_resolved` is ignored here.
pub fn validate_create(input: &TodoInput) -> Result<NewTodo, ValidationErrors> {
    let fields = clean_fields(input)?;
    Ok(NewTodo {
        title: fields.title,
        description: fields.description,
        due_date: fields.due_date,
        is_resolved: false,
    })
}

/// Validate an edit of `existing`, returning the record with the submitted
/// values applied. Identity and timestamps are left for the store.
pub fn validate_update(existing: &Todo, input: &TodoInput) -> Result<Todo, ValidationErrors> {
    let fields = clean_fields(input)?;
    Ok(Todo {
        title: fields.title,
        description: fields.description,
        due_date: fields.due_date,
        is_resolved: parse_checkbox(input.is_resolved.as_deref()),
        ..existing.clone()
    })
}

fn clean_fields(input: &TodoInput) -> Result<CleanFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = input.title.as_deref().unwrap_or("").trim().to_string();
    let title_len = title.chars().count();
    if title.is_empty() {
        errors.add("title", REQUIRED);
    } else if title_len > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!(
                "Ensure this value has at most {TITLE_MAX_CHARS} characters \
                 (it has {title_len})."
            ),
        );
    }

    let description = input.description.as_deref().unwrap_or("").trim().to_string();

    let due_date = match parse_date(input.due_date.as_deref().unwrap_or("")) {
        Ok(date) => date,
        Err(()) => {
            errors.add("due_date", INVALID_DATE);
            None
        }
    };

    if errors.is_empty() {
        Ok(CleanFields {
            title,
            description,
            due_date,
        })
    } else {
        Err(errors)
    }
}

/// Blank means no date. Anything else has to match one of [`DATE_FORMATS`].
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(Some)
        .ok_or(())
}

/// HTML checkbox semantics: absent or a falsy spelling is false.
pub fn parse_checkbox(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") => false,
        Some(v) => !(v.eq_ignore_ascii_case("false") || v == "0"),
    }
}
