use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewTodo, Todo};

pub const TODO_NOT_FOUND_MESSAGE: &str = "the todo of that id does not exists";

// Request payload for todo creation. A client-supplied id is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        NewTodo {
            title: request.title,
            completed: request.completed,
        }
    }
}

// Single-key map carried in the envelope's `todo` field.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Todo { todo: Option<Todo> },
    Todos { todos: Vec<Todo> },
    Deleted { todo: bool },
}

// Field-level error attached to an envelope.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResponseError {
    pub field: String,
    pub message: String,
}

impl ResponseError {
    pub fn todo_not_found() -> Self {
        Self {
            field: "id".to_string(),
            message: TODO_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

// Uniform response wrapper for every todo route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub time_stamp: NaiveDateTime,
    pub status_code: u16,
    pub status: String,
    pub todo: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
    #[serde(skip)]
    http_status: StatusCode,
}

impl Envelope {
    pub fn new(status: StatusCode, payload: Payload) -> Self {
        Self {
            time_stamp: Local::now().naive_local(),
            status_code: status.as_u16(),
            status: status_name(status),
            todo: payload,
            error: None,
            http_status: status,
        }
    }

    // Missing records still answer 200; the error block carries the failure.
    pub fn not_found(payload: Payload) -> Self {
        Self {
            error: Some(ResponseError::todo_not_found()),
            ..Self::new(StatusCode::OK, payload)
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

// "OK", "CREATED", "INTERNAL_SERVER_ERROR", ...
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_ascii_uppercase()
        .replace(' ', "_")
}

// Simple error body for faults outside the envelope contract.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

// Response payload for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
