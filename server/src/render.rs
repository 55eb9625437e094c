//! HTML rendering with Tera.
//!
//! # Design
//! Templates are compiled into the binary and parsed once when the state is
//! built. Every page gets a flat, string-typed context assembled here, so
//! templates never format dates or compute `is_overdue` themselves.

use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};
use todo_core::admin::AdminQuery;
use todo_core::controller::{FormView, ListView};
use todo_core::{Notice, Todo, View};

use crate::error::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("todo_form.html", include_str!("../templates/todo_form.html")),
    (
        "todo_confirm_delete.html",
        include_str!("../templates/todo_confirm_delete.html"),
    ),
    ("admin.html", include_str!("../templates/admin.html")),
];

/// A todo flattened for display.
#[derive(Debug, Serialize)]
struct TodoRow<'a> {
    id: i64,
    title: &'a str,
    description: &'a str,
    due_date: Option<String>,
    is_resolved: bool,
    is_overdue: bool,
    created_at: String,
}

impl<'a> TodoRow<'a> {
    fn new(todo: &'a Todo, today: NaiveDate) -> Self {
        Self {
            id: todo.id,
            title: &todo.title,
            description: &todo.description,
            due_date: todo.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            is_resolved: todo.is_resolved,
            is_overdue: todo.is_overdue_on(today),
            created_at: todo.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageLinks {
    number: usize,
    num_pages: usize,
    has_next: bool,
    has_previous: bool,
}

#[derive(Debug, Serialize)]
struct ListContext<'a> {
    todos: Vec<TodoRow<'a>>,
    current_filter: &'static str,
    total_count: usize,
    active_count: usize,
    completed_count: usize,
    page: PageLinks,
    notice: Option<&'a Notice>,
}

#[derive(Debug, Serialize)]
struct FormValues<'a> {
    title: &'a str,
    description: &'a str,
    due_date: &'a str,
    is_resolved: bool,
}

#[derive(Debug, Serialize)]
struct FormErrors<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    due_date: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct FormContext<'a> {
    todo: Option<TodoRow<'a>>,
    action: String,
    values: FormValues<'a>,
    errors: FormErrors<'a>,
    notice: Option<&'a Notice>,
}

#[derive(Debug, Serialize)]
struct ConfirmContext<'a> {
    todo: TodoRow<'a>,
    notice: Option<&'a Notice>,
}

#[derive(Debug, Serialize)]
struct AdminContext<'a> {
    todos: Vec<TodoRow<'a>>,
    result_count: usize,
    q: &'a str,
    is_resolved: &'static str,
    due_date: &'static str,
    created_at: &'static str,
    notice: Option<&'a Notice>,
}

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &impl Serialize) -> Result<String, AppError> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(name, &context)?)
    }

    pub fn view(
        &self,
        view: &View,
        notice: Option<&Notice>,
        today: NaiveDate,
    ) -> Result<String, AppError> {
        match view {
            View::List(list) => self.list(list, notice, today),
            View::Form(form) => self.form(form, notice, today),
            View::ConfirmDelete(todo) => self.render(
                "todo_confirm_delete.html",
                &ConfirmContext {
                    todo: TodoRow::new(todo, today),
                    notice,
                },
            ),
        }
    }

    fn list(
        &self,
        view: &ListView,
        notice: Option<&Notice>,
        today: NaiveDate,
    ) -> Result<String, AppError> {
        let context = ListContext {
            todos: view.page.items.iter().map(|t| TodoRow::new(t, today)).collect(),
            current_filter: view.current_filter.as_str(),
            total_count: view.counts.total,
            active_count: view.counts.active,
            completed_count: view.counts.completed,
            page: PageLinks {
                number: view.page.number,
                num_pages: view.page.num_pages,
                has_next: view.page.has_next,
                has_previous: view.page.has_previous,
            },
            notice,
        };
        self.render("home.html", &context)
    }

    fn form(
        &self,
        view: &FormView,
        notice: Option<&Notice>,
        today: NaiveDate,
    ) -> Result<String, AppError> {
        let action = match &view.todo {
            Some(todo) => format!("/{}/edit/", todo.id),
            None => "/create/".to_string(),
        };
        let values = FormValues {
            title: view.values.title.as_deref().unwrap_or(""),
            description: view.values.description.as_deref().unwrap_or(""),
            due_date: view.values.due_date.as_deref().unwrap_or(""),
            is_resolved: todo_core::form::parse_checkbox(view.values.is_resolved.as_deref()),
        };
        let context = FormContext {
            todo: view.todo.as_ref().map(|t| TodoRow::new(t, today)),
            action,
            values,
            errors: FormErrors {
                title: view.errors.get("title"),
                description: view.errors.get("description"),
                due_date: view.errors.get("due_date"),
            },
            notice,
        };
        self.render("todo_form.html", &context)
    }

    pub fn admin(
        &self,
        todos: &[Todo],
        query: &AdminQuery,
        notice: Option<&Notice>,
        today: NaiveDate,
    ) -> Result<String, AppError> {
        let context = AdminContext {
            todos: todos.iter().map(|t| TodoRow::new(t, today)).collect(),
            result_count: todos.len(),
            q: &query.search,
            is_resolved: match query.is_resolved {
                Some(true) => "1",
                Some(false) => "0",
                None => "",
            },
            due_date: query.due_date.as_str(),
            created_at: query.created_at.as_str(),
            notice,
        };
        self.render("admin.html", &context)
    }
}
