use crate::domain::errors::TodoError;
use crate::domain::ports::TodoStore;
use crate::interface_adapters::protocol::{
    CreateTodoRequest, Envelope, ErrorResponse, HealthResponse, Payload, TODO_NOT_FOUND_MESSAGE,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::TodoService;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, error, info};

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn todo_service(state: &AppState) -> TodoService<Arc<dyn TodoStore>> {
    TodoService {
        store: state.store.clone(),
    }
}

// Handler for listing every todo.
pub async fn list_todos(State(state): State<AppState>) -> Result<Envelope, HandlerError> {
    info!(method = "GET", route = "/api/v1/todos/all", "request");

    let todos = todo_service(&state)
        .get_todos()
        .await
        .map_err(map_todo_error)?;

    Ok(Envelope::new(StatusCode::OK, Payload::Todos { todos }))
}

// Handler for creating a todo; the store assigns the id.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<Envelope, HandlerError> {
    info!(method = "POST", route = "/api/v1/todos/create", "request");

    let todo = todo_service(&state)
        .create_todo(payload.into())
        .await
        .map_err(map_todo_error)?;
    debug!(id = todo.id, "todo created");

    Ok(Envelope::new(
        StatusCode::CREATED,
        Payload::Todo { todo: Some(todo) },
    ))
}

// Handler for fetching one todo by id.
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope, HandlerError> {
    info!(method = "GET", route = "/api/v1/todos/get/{id}", id, "request");

    let result = todo_service(&state).get_todo(id).await;
    respond(
        result,
        |todo| Payload::Todo { todo: Some(todo) },
        Payload::Todo { todo: None },
    )
}

// Handler for toggling a todo's completion. The request body is not read.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope, HandlerError> {
    info!(method = "PUT", route = "/api/v1/todos/update/{id}", id, "request");

    let result = todo_service(&state).update_todo(id).await;
    respond(
        result,
        |todo| Payload::Todo { todo: Some(todo) },
        Payload::Todo { todo: None },
    )
}

// Handler for deleting a todo by id.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope, HandlerError> {
    info!(method = "DELETE", route = "/api/v1/todos/delete/{id}", id, "request");

    let result = todo_service(&state).delete_todo(id).await;
    respond(
        result,
        |deleted| Payload::Deleted { todo: deleted },
        Payload::Deleted { todo: false },
    )
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// Wraps a by-id result; NotFound becomes a 200 envelope with an error block.
fn respond<T>(
    result: Result<T, TodoError>,
    found: impl FnOnce(T) -> Payload,
    missing: Payload,
) -> Result<Envelope, HandlerError> {
    match result {
        Ok(value) => Ok(Envelope::new(StatusCode::OK, found(value))),
        Err(TodoError::NotFound(id)) => {
            debug!(id, "todo not found");
            Ok(Envelope::not_found(missing))
        }
        Err(err) => Err(map_todo_error(err)),
    }
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

fn map_todo_error(err: TodoError) -> HandlerError {
    match err {
        TodoError::NotFound(_) => error_response(StatusCode::NOT_FOUND, TODO_NOT_FOUND_MESSAGE),
        TodoError::StorageFailure => {
            error!("request failed on storage");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
        }
    }
}
