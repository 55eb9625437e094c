//! Operator view: search, filters and bulk resolution changes.
//!
//! # Design
//! Filtering happens on the ordered sequence the store returns, so the admin
//! view and the public list agree on order. Date windows are evaluated
//! against a `today` supplied by the caller.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::controller::{Notice, Outcome};
use crate::error::TodoError;
use crate::listing::StatusFilter;
use crate::store::TodoStore;
use crate::types::{Todo, TodoId};

/// A date window for the `due_date` and `created_at` filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    Unfiltered,
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
    NoDate,
    HasDate,
}

impl DateFilter {
    /// Query values for `due_date`. Unknown values mean `Unfiltered`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("today") => DateFilter::Today,
            Some("past_7_days") => DateFilter::Past7Days,
            Some("this_month") => DateFilter::ThisMonth,
            Some("this_year") => DateFilter::ThisYear,
            Some("none") => DateFilter::NoDate,
            Some("any") => DateFilter::HasDate,
            _ => DateFilter::Unfiltered,
        }
    }

    /// Query values for `created_at`. Every todo has a creation date, so the
    /// presence filters `none` and `any` are ignored here.
    pub fn parse_created(raw: Option<&str>) -> Self {
        match Self::parse(raw) {
            DateFilter::NoDate | DateFilter::HasDate => DateFilter::Unfiltered,
            filter => filter,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateFilter::Unfiltered => "",
            DateFilter::Today => "today",
            DateFilter::Past7Days => "past_7_days",
            DateFilter::ThisMonth => "this_month",
            DateFilter::ThisYear => "this_year",
            DateFilter::NoDate => "none",
            DateFilter::HasDate => "any",
        }
    }

    /// Half-open window `[start, end)` for the bounded variants.
    fn window(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let tomorrow = today + Duration::days(1);
        match self {
            DateFilter::Today => Some((today, tomorrow)),
            DateFilter::Past7Days => Some((today - Duration::days(7), tomorrow)),
            DateFilter::ThisMonth => {
                let start = today.with_day(1)?;
                let end = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
                };
                Some((start, end))
            }
            DateFilter::ThisYear => Some((
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?,
            )),
            DateFilter::Unfiltered | DateFilter::NoDate | DateFilter::HasDate => None,
        }
    }

    pub fn matches(self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (self, date) {
            (DateFilter::Unfiltered, _) => true,
            (DateFilter::NoDate, d) => d.is_none(),
            (DateFilter::HasDate, d) => d.is_some(),
            (_, None) => false,
            (window, Some(d)) => window
                .window(today)
                .is_some_and(|(start, end)| start <= d && d < end),
        }
    }
}

/// Search text plus filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminQuery {
    pub search: String,
    pub is_resolved: Option<bool>,
    pub due_date: DateFilter,
    pub created_at: DateFilter,
}

impl AdminQuery {
    /// Every whitespace-separated term must appear in the title or the
    /// description, ignoring case. A blank search matches everything.
    fn matches_search(&self, todo: &Todo) -> bool {
        let title = todo.title.to_lowercase();
        let description = todo.description.to_lowercase();
        self.search
            .split_whitespace()
            .map(str::to_lowercase)
            .all(|term| title.contains(&term) || description.contains(&term))
    }

    pub fn matches(&self, todo: &Todo, today: NaiveDate) -> bool {
        self.matches_search(todo)
            && self.due_date.matches(todo.due_date, today)
            && self
                .created_at
                .matches(Some(todo.created_at.date_naive()), today)
    }
}

/// `1` and `0` select resolved and unresolved, anything else both.
pub fn parse_resolved_filter(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("1") => Some(true),
        Some("0") => Some(false),
        _ => None,
    }
}

/// Todos matching `query`, newest first.
pub fn changelist(
    store: &dyn TodoStore,
    query: &AdminQuery,
    today: NaiveDate,
) -> Result<Vec<Todo>, TodoError> {
    let status = match query.is_resolved {
        None => StatusFilter::All,
        Some(false) => StatusFilter::Active,
        Some(true) => StatusFilter::Completed,
    };
    let todos = store
        .list(status)?
        .into_iter()
        .filter(|t| query.matches(t, today))
        .collect();
    Ok(todos)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    MarkResolved,
    MarkUnresolved,
}

impl BulkAction {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("mark_resolved") => Some(BulkAction::MarkResolved),
            Some("mark_unresolved") => Some(BulkAction::MarkUnresolved),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            BulkAction::MarkResolved => "resolved",
            BulkAction::MarkUnresolved => "unresolved",
        }
    }
}

pub const ADMIN_LOCATION: &str = "/admin/";

/// Apply `action` to `selected` and report how many todos changed.
pub fn run_action(
    store: &mut dyn TodoStore,
    action: Option<BulkAction>,
    selected: &[TodoId],
    now: DateTime<Utc>,
) -> Result<Outcome, TodoError> {
    let Some(action) = action else {
        return Ok(Outcome::redirect(
            ADMIN_LOCATION,
            Notice::warning("No action selected."),
        ));
    };
    if selected.is_empty() {
        return Ok(Outcome::redirect(
            ADMIN_LOCATION,
            Notice::warning(
                "Items must be selected in order to perform actions on them. \
                 No items have been changed.",
            ),
        ));
    }

    let resolved = action == BulkAction::MarkResolved;
    let updated = store.set_resolved(selected, resolved, now)?;
    tracing::info!(updated, resolved, "bulk action applied");
    Ok(Outcome::redirect(
        ADMIN_LOCATION,
        Notice::success(format!("{updated} TODO(s) marked as {}.", action.label())),
    ))
}
