//! Request handlers for the task endpoints.
//!
//! Handlers read the path identifier and body, call the service, and shape
//! the outcome into an envelope. Verb checks live in the router.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use mockable::Clock;

use super::{
    dto::{DataResponse, MessageDataResponse, MessageResponse, TaskResponse, ToggleResponse},
    error::ApiErrorResponse,
    operation::Operation,
};
use crate::task::{
    domain::{TaskId, TaskView},
    ports::TaskRepository,
    services::TaskLifecycleService,
    validation::TaskPayload,
};

/// Service handle shared by every handler.
pub type AppState<R, C> = Arc<TaskLifecycleService<R, C>>;

/// `GET /task`
///
/// # Errors
///
/// Returns 404 for an empty store and 400 when a stored row is incomplete.
pub async fn list_tasks<R, C>(
    State(service): State<AppState<R, C>>,
) -> Result<Json<DataResponse<Vec<TaskView>>>, ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service
        .list()
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::List, error))?;
    Ok(Json(DataResponse::success(tasks)))
}

/// `POST /task/store`
///
/// # Errors
///
/// Returns 400 for an unreadable or invalid body.
pub async fn create_task<R, C>(
    State(service): State<AppState<R, C>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageDataResponse<TaskResponse>>), ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = read_payload(Operation::Create, &body)?;
    let task = service
        .create(&payload)
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::Create, error))?;
    Ok((
        StatusCode::CREATED,
        Json(MessageDataResponse::success(
            "Task created successfully.",
            TaskResponse::from(&task),
        )),
    ))
}

/// `GET /task/edit/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identifier and 404 for a missing task.
pub async fn fetch_task<R, C>(
    State(service): State<AppState<R, C>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<TaskView>>, ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(Operation::FetchOne, raw_id)?;
    let task = service
        .fetch_one(id)
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::FetchOne, error))?;
    Ok(Json(DataResponse::success(task)))
}

/// `PUT /task/update/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identifier or invalid body and 404 for a
/// missing task.
pub async fn update_task<R, C>(
    State(service): State<AppState<R, C>>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<MessageDataResponse<TaskResponse>>, ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(Operation::Update, raw_id)?;
    let task = service
        .update_from_body(id, &body)
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::Update, error))?;
    Ok(Json(MessageDataResponse::success(
        "Task updated successfully.",
        TaskResponse::from(&task),
    )))
}

/// `DELETE /task/delete/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identifier and 404 for a missing task.
pub async fn delete_task<R, C>(
    State(service): State<AppState<R, C>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(Operation::Delete, raw_id)?;
    service
        .delete(id)
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::Delete, error))?;
    Ok(Json(MessageResponse::success("Task deleted successfully.")))
}

/// `PATCH /task/status/{id}`
///
/// # Errors
///
/// Returns 400 for a malformed identifier and 404 for a missing task.
pub async fn toggle_task<R, C>(
    State(service): State<AppState<R, C>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ToggleResponse>, ApiErrorResponse>
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(Operation::ToggleChecked, raw_id)?;
    let checked = service
        .toggle_checked(id)
        .await
        .map_err(|error| ApiErrorResponse::from_lifecycle(Operation::ToggleChecked, error))?;
    Ok(Json(ToggleResponse::success(
        "Task status updated successfully.",
        checked,
    )))
}

fn parse_id(
    operation: Operation,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<TaskId, ApiErrorResponse> {
    let Path(raw) = raw_id.map_err(|rejection| {
        tracing::info!(operation = operation.name(), %rejection, "unreadable task identifier");
        ApiErrorResponse::invalid_id()
    })?;
    raw.parse::<TaskId>().map_err(|error| {
        tracing::info!(operation = operation.name(), %error, "rejected task identifier");
        ApiErrorResponse::invalid_id()
    })
}

fn read_payload(operation: Operation, body: &Bytes) -> Result<TaskPayload, ApiErrorResponse> {
    TaskPayload::from_body(body).map_err(|error| ApiErrorResponse::invalid_payload(operation, &error))
}
