use tracing::error;

use crate::domain::entities::{NewTodo, Todo};
use crate::domain::errors::TodoError;
use crate::domain::ports::TodoStore;

// Todo service with an injected store.
pub struct TodoService<S> {
    pub store: S,
}

impl<S> TodoService<S>
where
    S: TodoStore,
{
    pub async fn create_todo(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        self.store.insert(todo).await.map_err(storage_failure)
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.store.find_all().await.map_err(storage_failure)
    }

    pub async fn get_todo(&self, id: i64) -> Result<Todo, TodoError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(storage_failure)?
            .ok_or(TodoError::NotFound(id))
    }

    // Flips `completed` on the stored record. The title is left as stored.
    pub async fn update_todo(&self, id: i64) -> Result<Todo, TodoError> {
        let mut todo = self.get_todo(id).await?;
        todo.completed = !todo.completed;

        self.store
            .update(todo)
            .await
            .map_err(storage_failure)?
            .ok_or(TodoError::NotFound(id))
    }

    pub async fn delete_todo(&self, id: i64) -> Result<bool, TodoError> {
        self.get_todo(id).await?;

        let deleted = self
            .store
            .delete_by_id(id)
            .await
            .map_err(storage_failure)?;

        // Removed by someone else between the lookup and the delete.
        if !deleted {
            return Err(TodoError::NotFound(id));
        }

        Ok(true)
    }
}

fn storage_failure(err: String) -> TodoError {
    error!(error = %err, "todo store failure");
    TodoError::StorageFailure
}
