//! Status filtering, pagination and the counts shown next to the filter tabs.

use std::fmt;

use serde::Serialize;

use crate::error::TodoError;
use crate::store::TodoStore;
use crate::types::{Counts, Todo};

pub const PAGE_SIZE: usize = 10;

/// Which todos a list shows. Parsing never fails: unknown values mean `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => StatusFilter::Active,
            Some("completed") => StatusFilter::Completed,
            _ => StatusFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    /// The `is_resolved` value selected, `None` for every record.
    pub fn resolved(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(false),
            StatusFilter::Completed => Some(true),
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        self.resolved().map_or(true, |r| todo.is_resolved == r)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested page: a 1-based number or the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(usize),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::Number(1)
    }
}

impl PageRequest {
    /// Absent or blank means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, TodoError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(PageRequest::default()),
            Some("last") => Ok(PageRequest::Last),
            Some(v) => match v.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(PageRequest::Number(n)),
                _ => Err(TodoError::InvalidPage(v.to_string())),
            },
        }
    }
}

/// One page of a longer sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Cut `items` into pages of `size` and keep the requested one. An empty
    /// sequence still has a first page. A `size` of zero is treated as one.
    pub fn paginate(items: Vec<T>, request: PageRequest, size: usize) -> Result<Self, TodoError> {
        let size = size.max(1);
        let num_pages = items.len().div_ceil(size).max(1);
        let number = match request {
            PageRequest::Last => num_pages,
            PageRequest::Number(n) if n <= num_pages => n,
            PageRequest::Number(n) => return Err(TodoError::InvalidPage(n.to_string())),
        };
        let items = items
            .into_iter()
            .skip((number - 1) * size)
            .take(size)
            .collect();
        Ok(Page {
            items,
            number,
            num_pages,
            has_next: number < num_pages,
            has_previous: number > 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub page: Page<Todo>,
    pub counts: Counts,
}

/// Filtered, paginated todos plus counts over the whole collection.
pub fn list(
    store: &dyn TodoStore,
    status: StatusFilter,
    page: PageRequest,
) -> Result<Listing, TodoError> {
    let todos = store.list(status)?;
    Ok(Listing {
        page: Page::paginate(todos, page, PAGE_SIZE)?,
        counts: store.counts()?,
    })
}
