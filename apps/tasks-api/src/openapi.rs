use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Task Management API",
        version = "0.1.0",
        description = "CRUD API for tasks with filtering, sorting, pagination, statistics, bulk insert and CSV export"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
