use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::TodoStore;
use crate::error::StoreError;
use crate::listing::StatusFilter;
use crate::types::{Counts, NewTodo, Todo, TodoId};

/// Todos kept in process memory, keyed by id. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    fn insert(&mut self, new: &NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError> {
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            title: new.title.clone(),
            description: new.description.clone(),
            due_date: new.due_date,
            is_resolved: new.is_resolved,
            created_at: now,
            updated_at: now,
        };
        self.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.get(&id).cloned())
    }

    fn update(&mut self, todo: &Todo, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError> {
        let Some(stored) = self.todos.get_mut(&todo.id) else {
            return Ok(None);
        };
        stored.title = todo.title.clone();
        stored.description = todo.description.clone();
        stored.due_date = todo.due_date;
        stored.is_resolved = todo.is_resolved;
        stored.updated_at = now;
        Ok(Some(stored.clone()))
    }

    fn delete(&mut self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.remove(&id))
    }

    fn set_resolved(
        &mut self,
        ids: &[TodoId],
        resolved: bool,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut updated = 0;
        for todo in self.todos.values_mut().filter(|t| ids.contains(&t.id)) {
            todo.is_resolved = resolved;
            todo.updated_at = now;
            updated += 1;
        }
        Ok(updated)
    }

    fn list(&self, status: StatusFilter) -> Result<Vec<Todo>, StoreError> {
        let mut todos: Vec<Todo> = self
            .todos
            .values()
            .filter(|t| status.matches(t))
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    fn counts(&self) -> Result<Counts, StoreError> {
        let completed = self.todos.values().filter(|t| t.is_resolved).count();
        Ok(Counts {
            total: self.todos.len(),
            active: self.todos.len() - completed,
            completed,
        })
    }
}
