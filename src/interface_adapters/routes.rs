use crate::interface_adapters::handlers::{
    create_todo, delete_todo, get_todo, health, list_todos, update_todo,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/todos/all", get(list_todos))
        .route("/api/v1/todos/create", post(create_todo))
        .route("/api/v1/todos/get/{id}", get(get_todo))
        .route("/api/v1/todos/update/{id}", put(update_todo))
        .route("/api/v1/todos/delete/{id}", delete(delete_todo))
        .with_state(state)
}
