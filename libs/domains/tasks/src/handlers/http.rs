use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_helpers::ValidatedJson;
use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::export;
use crate::models::{
    BulkCreateResult, BulkCreateTasks, CreateTask, MessageResponse, Task, TaskStats, UpdateTask,
    UpdateTaskStatus,
};
use crate::query::{TaskFilter, TaskListParams, TaskListResponse};
use crate::repository::TaskRepository;
use crate::service::TaskService;

fn parse_id(raw: &str) -> TaskResult<i32> {
    raw.parse()
        .map_err(|_| TaskError::Validation("Invalid task ID".to_string()))
}

/// List tasks with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskListParams),
    responses(
        (status = 200, description = "One page of tasks plus metadata", body = TaskListResponse),
        (status = 400, description = "Invalid filter, date or sort field", body = axum_helpers::ErrorResponse),
        (status = 500, description = "Internal server error", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(params): Query<TaskListParams>,
) -> TaskResult<Json<TaskListResponse>> {
    let filter = TaskFilter::try_from(params)?;
    let page = service.list_tasks(filter.clone()).await?;

    Ok(Json(TaskListResponse::new(page, &filter)))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Invalid request", body = axum_helpers::ErrorResponse),
        (status = 500, description = "Internal server error", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID", body = axum_helpers::ErrorResponse),
        (status = 404, description = "Task not found", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(parse_id(&id)?).await?;
    Ok(Json(task))
}

/// Partially update a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Invalid request", body = axum_helpers::ErrorResponse),
        (status = 404, description = "Task not found", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(parse_id(&id)?, input).await?;
    Ok(Json(task))
}

/// Update only the status of a task
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskStatus,
    responses(
        (status = 200, description = "Status updated", body = Task),
        (status = 400, description = "Missing or invalid status", body = axum_helpers::ErrorResponse),
        (status = 404, description = "Task not found", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn update_task_status<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTaskStatus>,
) -> TaskResult<Json<Task>> {
    let task = service.update_status(parse_id(&id)?, input.status).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, description = "Invalid task ID", body = axum_helpers::ErrorResponse),
        (status = 404, description = "Task not found", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<MessageResponse>> {
    service.delete_task(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Create multiple tasks at once.
///
/// Valid items are persisted in one transaction; invalid items are
/// reported per index. 201 when at least one task was created, 400 when
/// none were.
#[utoipa::path(
    post,
    path = "/bulk",
    tag = "tasks",
    request_body = BulkCreateTasks,
    responses(
        (status = 201, description = "At least one task created", body = BulkCreateResult),
        (status = 400, description = "No task could be created", body = BulkCreateResult),
        (status = 500, description = "Internal server error", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn bulk_create_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<BulkCreateTasks>,
) -> TaskResult<impl IntoResponse> {
    let result = service.bulk_create(input.tasks).await?;

    let status = if result.created_count > 0 {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(result)))
}

/// Aggregate task statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "tasks",
    responses(
        (status = 200, description = "Aggregate counts", body = TaskStats),
        (status = 500, description = "Internal server error", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn get_task_stats<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<TaskStats>> {
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// Export all tasks as a CSV attachment
#[utoipa::path(
    get,
    path = "/export",
    tag = "tasks",
    responses(
        (status = 200, description = "CSV file with all tasks", content_type = "text/csv"),
        (status = 500, description = "Internal server error", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn export_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<impl IntoResponse> {
    let tasks = service.export_tasks().await?;
    let csv = export::tasks_to_csv(&tasks)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=tasks_export.csv",
            ),
        ],
        csv,
    ))
}
