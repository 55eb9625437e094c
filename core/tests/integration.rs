//! Full todo lifecycle through the public controller API on a SQLite store.
//!
//! # Design
//! Drives every operation in the order a user would, against the on-disk
//! backend, so the controller, validation, listing and store are checked
//! together rather than one at a time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use todo_core::admin::{self, AdminQuery, BulkAction};
use todo_core::controller::{self, ListView, View};
use todo_core::{
    Outcome, PageRequest, SqliteStore, StatusFilter, TodoError, TodoInput, TodoStore,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()
}

fn form(title: &str) -> TodoInput {
    TodoInput {
        title: Some(title.to_string()),
        ..TodoInput::default()
    }
}

fn list_view(store: &dyn TodoStore, status: StatusFilter) -> ListView {
    match controller::list(store, status, PageRequest::default()).unwrap() {
        Outcome::Render(View::List(view)) => view,
        other => panic!("expected list view, got {other:?}"),
    }
}

#[test]
fn crud_lifecycle() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    // Step 1: the list starts empty.
    let view = list_view(&store, StatusFilter::All);
    assert!(view.page.items.is_empty(), "expected empty list");
    assert_eq!(view.counts.total, 0);

    // Step 2: a submission without a title is turned back.
    let outcome = controller::create(&mut store, &TodoInput::default(), t0()).unwrap();
    assert!(matches!(outcome, Outcome::Render(View::Form(_))));
    assert_eq!(store.counts().unwrap().total, 0);

    // Step 3: create two todos.
    controller::create(&mut store, &form("Integration test"), t0()).unwrap();
    controller::create(&mut store, &form("Second"), t0() + Duration::seconds(1)).unwrap();
    let view = list_view(&store, StatusFilter::All);
    let titles: Vec<_> = view.page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "Integration test"]);
    let id = view.page.items[1].id;

    // Step 4: update title and resolve through the edit form.
    let edit = TodoInput {
        title: Some("Updated title".to_string()),
        is_resolved: Some("on".to_string()),
        ..TodoInput::default()
    };
    controller::update(&mut store, id, &edit, t0() + Duration::minutes(1)).unwrap();
    let todo = store.get(id).unwrap().unwrap();
    assert_eq!(todo.title, "Updated title");
    assert!(todo.is_resolved);

    // Step 5: filters narrow the list, counts stay global.
    let view = list_view(&store, StatusFilter::Active);
    assert_eq!(view.page.items.len(), 1);
    assert_eq!((view.counts.total, view.counts.active, view.counts.completed), (2, 1, 1));

    // Step 6: toggle reopens it.
    controller::toggle(&mut store, id, t0() + Duration::minutes(2)).unwrap();
    assert!(!store.get(id).unwrap().unwrap().is_resolved);

    // Step 7: bulk-resolve everything from the admin side.
    let all: Vec<_> = admin::changelist(&store, &AdminQuery::default(), t0().date_naive())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    admin::run_action(&mut store, Some(BulkAction::MarkResolved), &all, t0()).unwrap();
    assert_eq!(list_view(&store, StatusFilter::Completed).page.items.len(), 2);

    // Step 8: delete.
    controller::delete(&mut store, id).unwrap();

    // Step 9: everything addressed by the deleted id is NotFound.
    assert!(matches!(controller::edit_form(&store, id), Err(TodoError::NotFound(_))));
    assert!(matches!(controller::delete(&mut store, id), Err(TodoError::NotFound(_))));
    assert!(matches!(
        controller::toggle(&mut store, id, t0()),
        Err(TodoError::NotFound(_))
    ));

    // Step 10: one todo left.
    assert_eq!(list_view(&store, StatusFilter::All).page.items.len(), 1);
}

#[test]
fn page_out_of_range_is_an_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    let err = controller::list(&store, StatusFilter::All, PageRequest::Number(2)).unwrap_err();
    assert!(matches!(err, TodoError::InvalidPage(_)));
}
