use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{NewTodo, Todo};

// Port for todo persistence used by the todo service.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, String>;
    // Returns None when no record has the todo's id.
    async fn update(&self, todo: Todo) -> Result<Option<Todo>, String>;
    async fn find_all(&self) -> Result<Vec<Todo>, String>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, String>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, String>;
}

#[async_trait]
impl<T> TodoStore for Arc<T>
where
    T: TodoStore + ?Sized,
{
    async fn insert(&self, todo: NewTodo) -> Result<Todo, String> {
        (**self).insert(todo).await
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, String> {
        (**self).update(todo).await
    }

    async fn find_all(&self) -> Result<Vec<Todo>, String> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, String> {
        (**self).find_by_id(id).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, String> {
        (**self).delete_by_id(id).await
    }
}
