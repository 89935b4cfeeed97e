//! Route handlers. Each one maps to exactly one store operation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::extract::{BaseUrl, TodoBody, TodoPath};
use crate::json::JsonUtf8;
use crate::model::TodoView;
use crate::AppState;

pub async fn list_todos(State(state): State<AppState>, BaseUrl(base): BaseUrl) -> Response {
    let todos = state.store.list().await;
    tracing::debug!(count = todos.len(), "listing todos");
    let views: Vec<TodoView<'_>> = todos.iter().map(|todo| todo.view(&base)).collect();
    JsonUtf8(views).into_response()
}

pub async fn create_todo(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    TodoBody(fields): TodoBody,
) -> Response {
    let todo = state.store.create(fields).await;
    let count = state.store.len().await;
    tracing::info!(id = %todo.id, title = %todo.title, count, "created todo");
    JsonUtf8(todo.view(&base)).into_response()
}

pub async fn clear_todos(State(state): State<AppState>) -> StatusCode {
    let removed = state.store.clear().await;
    tracing::info!(removed, "cleared todos");
    StatusCode::OK
}

pub async fn get_todo(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    TodoPath(id): TodoPath,
) -> Result<Response, ApiError> {
    let todo = state.store.get(id).await.ok_or(ApiError::NotFound(id))?;
    tracing::debug!(%id, "fetched todo");
    Ok(JsonUtf8(todo.view(&base)).into_response())
}

pub async fn update_todo(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    TodoPath(id): TodoPath,
    TodoBody(fields): TodoBody,
) -> Result<Response, ApiError> {
    let todo = state
        .store
        .update(id, fields)
        .await
        .ok_or(ApiError::NotFound(id))?;
    tracing::info!(%id, completed = todo.completed, "updated todo");
    Ok(JsonUtf8(todo.view(&base)).into_response())
}

pub async fn delete_todo(
    State(state): State<AppState>,
    TodoPath(id): TodoPath,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete(id).await {
        return Err(ApiError::NotFound(id));
    }
    let remaining = state.store.len().await;
    tracing::info!(%id, remaining, "deleted todo");
    Ok(StatusCode::OK)
}
