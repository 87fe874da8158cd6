use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{NewTodo, Todo};
use crate::domain::ports::TodoStore;

pub(crate) type TodoTable = Arc<Mutex<BTreeMap<i64, Todo>>>;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub update: bool,
    pub find: bool,
    pub delete: bool,
}

// Fake store that keeps rows in memory and can be told to fail per operation.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    todos: TodoTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(BTreeMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_todo(&self, id: i64, title: impl Into<String>, completed: bool) {
        let mut guard = self.todos.lock().expect("todos mutex poisoned");
        guard.insert(
            id,
            Todo {
                id,
                title: title.into(),
                completed,
            },
        );
    }

    pub(crate) fn get_test_todo(&self, id: i64) -> Option<Todo> {
        let guard = self.todos.lock().expect("todos mutex poisoned");
        guard.get(&id).cloned()
    }

    pub(crate) fn remove_test_todo(&self, id: i64) {
        let mut guard = self.todos.lock().expect("todos mutex poisoned");
        guard.remove(&id);
    }
}

#[async_trait]
impl TodoStore for RecordingStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.todos.lock().expect("todos mutex poisoned");
        let id = guard.keys().next_back().copied().unwrap_or(0) + 1;
        let stored = Todo {
            id,
            title: todo.title,
            completed: todo.completed,
        };
        guard.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, String> {
        if self.failures.update {
            return Err("update failed".to_string());
        }

        let mut guard = self.todos.lock().expect("todos mutex poisoned");
        match guard.get_mut(&todo.id) {
            Some(row) => {
                *row = todo.clone();
                Ok(Some(todo))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Todo>, String> {
        if self.failures.find {
            return Err("find failed".to_string());
        }

        let guard = self.todos.lock().expect("todos mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, String> {
        if self.failures.find {
            return Err("find failed".to_string());
        }

        let guard = self.todos.lock().expect("todos mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, String> {
        if self.failures.delete {
            return Err("delete failed".to_string());
        }

        let mut guard = self.todos.lock().expect("todos mutex poisoned");
        Ok(guard.remove(&id).is_some())
    }
}
