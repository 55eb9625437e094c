use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::TodoStore;
use crate::error::StoreError;
use crate::listing::StatusFilter;
use crate::types::{Counts, NewTodo, Todo, TodoId};

const COLUMNS: &str = "id, title, description, due_date, is_resolved, created_at, updated_at";

/// Todos in a single SQLite table.
///
/// Timestamps are stored as fixed-width RFC 3339 text with microseconds so
/// that `ORDER BY created_at` sorts chronologically.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened sqlite store");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn fetch(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todo = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                todo_from_row,
            )
            .optional()?;
        Ok(todo)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            due_date    TEXT,
            is_resolved INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS todos_created_at ON todos (created_at);",
    )?;
    Ok(())
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get::<_, Option<NaiveDate>>(3)?,
        is_resolved: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

impl TodoStore for SqliteStore {
    fn insert(&mut self, new: &NewTodo, now: DateTime<Utc>) -> Result<Todo, StoreError> {
        let at = timestamp(now);
        self.conn.execute(
            "INSERT INTO todos (title, description, due_date, is_resolved, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![new.title, new.description, new.due_date, new.is_resolved, at],
        )?;
        let id = self.conn.last_insert_rowid();
        let todo = self.conn.query_row(
            &format!("SELECT {COLUMNS} FROM todos WHERE id = ?1"),
            params![id],
            todo_from_row,
        )?;
        Ok(todo)
    }

    fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        self.fetch(id)
    }

    fn update(&mut self, todo: &Todo, now: DateTime<Utc>) -> Result<Option<Todo>, StoreError> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET title = ?2, description = ?3, due_date = ?4, is_resolved = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.due_date,
                todo.is_resolved,
                timestamp(now)
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.fetch(todo.id)
    }

    fn delete(&mut self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let Some(todo) = self.fetch(id)? else {
            return Ok(None);
        };
        self.conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(Some(todo))
    }

    fn set_resolved(
        &mut self,
        ids: &[TodoId],
        resolved: bool,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let at = timestamp(now);
        let tx = self.conn.transaction()?;
        let mut updated = 0;
        {
            let mut stmt =
                tx.prepare("UPDATE todos SET is_resolved = ?2, updated_at = ?3 WHERE id = ?1")?;
            for id in &ids {
                updated += stmt.execute(params![id, resolved, at])?;
            }
        }
        tx.commit()?;
        Ok(updated)
    }

    fn list(&self, status: StatusFilter) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM todos
             WHERE ?1 IS NULL OR is_resolved = ?1
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![status.resolved()], todo_from_row)?;
        let todos = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    fn counts(&self) -> Result<Counts, StoreError> {
        let (total, completed): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_resolved), 0) FROM todos",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let total = total as usize;
        let completed = completed as usize;
        Ok(Counts {
            total,
            active: total - completed,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn data_survives_reopening_the_file() {
        let path = std::env::temp_dir().join(format!("todo-core-{}.sqlite", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let id = {
            let mut store = SqliteStore::open(&path).unwrap();
            let new = NewTodo {
                title: "Persisted".to_string(),
                description: "on disk".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 7, 1),
                is_resolved: false,
            };
            store.insert(&new, at).unwrap().id
        };

        let store = SqliteStore::open(&path).unwrap();
        let todo = store.get(id).unwrap().unwrap();
        assert_eq!(todo.title, "Persisted");
        assert_eq!(todo.description, "on disk");
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(todo.created_at, at);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(timestamp(whole), "2025-06-01T12:00:00.000000Z");
    }
}
