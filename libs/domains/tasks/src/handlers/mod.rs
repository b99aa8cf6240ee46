mod http;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    BulkCreateResult, BulkCreateTasks, CreateTask, MessageResponse, PriorityCount, StatusCount,
    Task, TaskStats, TypeCount, UpdateTask, UpdateTaskStatus,
};
use crate::query::{AppliedFilters, PaginationInfo, SortInfo, TaskListResponse};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        http::list_tasks,
        http::create_task,
        http::get_task,
        http::update_task,
        http::update_task_status,
        http::delete_task,
        http::bulk_create_tasks,
        http::get_task_stats,
        http::export_tasks,
    ),
    components(
        schemas(
            Task,
            CreateTask,
            UpdateTask,
            UpdateTaskStatus,
            BulkCreateTasks,
            BulkCreateResult,
            TaskStats,
            TypeCount,
            PriorityCount,
            StatusCount,
            TaskListResponse,
            PaginationInfo,
            AppliedFilters,
            SortInfo,
            MessageResponse,
            axum_helpers::ErrorResponse,
        )
    ),
    tags(
        (name = "tasks", description = "Task management operations")
    )
)]
pub struct ApiDoc;

/// Create the tasks router.
///
/// Static segments are registered before `/{id}` so `stats`, `export` and
/// `bulk` resolve as routes, not identifiers.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(http::list_tasks).post(http::create_task))
        .route("/stats", get(http::get_task_stats))
        .route("/export", get(http::export_tasks))
        .route("/bulk", post(http::bulk_create_tasks))
        .route(
            "/{id}",
            get(http::get_task)
                .put(http::update_task)
                .delete(http::delete_task),
        )
        .route("/{id}/status", patch(http::update_task_status))
        .with_state(shared_service)
}
