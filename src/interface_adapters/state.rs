use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{NewTodo, Todo};
use crate::domain::ports::TodoStore;

// Application state holding the todo store shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemoryTodoStore::default()),
        }
    }

    pub fn postgres(db: PgPool) -> Self {
        Self {
            store: Arc::new(PostgresTodoStore { db }),
        }
    }
}

#[derive(Default)]
struct TodoTable {
    last_id: i64,
    rows: BTreeMap<i64, Todo>,
}

// In-memory todo store adapter for local runs without a database.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    todos: Arc<Mutex<TodoTable>>,
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, String> {
        let mut table = self.todos.lock().await;
        // Ids are never reused, even after deletes.
        table.last_id += 1;
        let stored = Todo {
            id: table.last_id,
            title: todo.title,
            completed: todo.completed,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, String> {
        let mut table = self.todos.lock().await;
        let Some(row) = table.rows.get_mut(&todo.id) else {
            return Ok(None);
        };
        *row = todo.clone();
        Ok(Some(todo))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, String> {
        let table = self.todos.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, String> {
        let table = self.todos.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, String> {
        let mut table = self.todos.lock().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

type TodoRow = (i64, String, bool);

fn from_row((id, title, completed): TodoRow) -> Todo {
    Todo {
        id,
        title,
        completed,
    }
}

// PostgreSQL-backed todo store over the `todos` table.
#[derive(Clone)]
pub struct PostgresTodoStore {
    pub db: PgPool,
}

#[async_trait]
impl TodoStore for PostgresTodoStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, String> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, completed)
            VALUES ($1, $2)
            RETURNING id, title, completed
            "#,
        )
        .bind(todo.title)
        .bind(todo.completed)
        .fetch_one(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(from_row(row))
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, String> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos SET title = $2, completed = $3
            WHERE id = $1
            RETURNING id, title, completed
            "#,
        )
        .bind(todo.id)
        .bind(todo.title)
        .bind(todo.completed)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(row.map(from_row))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, String> {
        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, completed FROM todos ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, String> {
        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, completed FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| err.to_string())?;

        Ok(row.map(from_row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, String> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| err.to_string())?;

        Ok(result.rows_affected() > 0)
    }
}
