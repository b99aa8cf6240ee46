//! Handler tests for the Tasks domain
//!
//! These exercise the HTTP layer end to end against a real PostgreSQL
//! container: request deserialization, status codes, response bodies and
//! the error contract. Routing middleware from the app binary (CORS, docs)
//! is out of scope here.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDatabase;
use tower::ServiceExt; // for oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn task_app(db: &TestDatabase) -> axum::Router {
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    handlers::router(service)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn patch_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::patch(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn valid_task(entity: &str) -> serde_json::Value {
    json!({
        "entity_name": entity,
        "task_type": "Meeting",
        "time": "09:30",
        "contact_person": "Jane Doe",
        "date": "2025-06-01",
        "due_date": "2025-06-20"
    })
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Roundtrip Ltd")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Task = json_body(response.into_body()).await;
    assert_eq!(created.entity_name, "Roundtrip Ltd");
    assert_eq!(created.status, TaskStatus::Open);
    assert_eq!(created.priority, TaskPriority::Medium);

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Task = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_defaults_date_to_today() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "entity_name": "No Date Inc",
                "task_type": "Call",
                "time": "10:00",
                "contact_person": "Jane"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Task = json_body(response.into_body()).await;
    assert_eq!(created.date, chrono::Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_rejects_bad_time_with_message() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let mut body = valid_task("Bad Time Inc");
    body["time"] = json!("25:00");

    let response = app.oneshot(post_json("/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "Time must be in HH:MM format");
}

#[tokio::test]
async fn test_create_rejects_malformed_date() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let mut body = valid_task("Bad Date Inc");
    body["date"] = json!("06/01/2025");

    let response = app.oneshot(post_json("/", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_id_is_404_with_json_error() {
    let db = TestDatabase::new().await;

    let response = task_app(&db).oneshot(get("/12345")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "Task 12345 not found");
}

#[tokio::test]
async fn test_put_applies_partial_update() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Update Me")))
        .await
        .unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .oneshot(put_json(
            &format!("/{}", created.id),
            json!({ "priority": "Urgent", "note": "escalated" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Task = json_body(response.into_body()).await;
    assert_eq!(updated.priority, TaskPriority::Urgent);
    assert_eq!(updated.note.as_deref(), Some("escalated"));
    assert_eq!(updated.entity_name, "Update Me");
}

#[tokio::test]
async fn test_status_patch_closes_and_reopens() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Close Me")))
        .await
        .unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(patch_json(
            &format!("/{}/status", created.id),
            json!({ "status": "Closed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let closed: Task = json_body(response.into_body()).await;
    assert_eq!(closed.status, TaskStatus::Closed);
    assert!(closed.completed_at.is_some());

    let response = app
        .oneshot(patch_json(
            &format!("/{}/status", created.id),
            json!({ "status": "In Progress" }),
        ))
        .await
        .unwrap();

    let reopened: Task = json_body(response.into_body()).await;
    assert_eq!(reopened.status, TaskStatus::InProgress);
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn test_status_patch_rejects_unknown_status() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Enum Check")))
        .await
        .unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .oneshot(patch_json(
            &format!("/{}/status", created.id),
            json!({ "status": "Done" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    let message = error["error"].as_str().unwrap();
    assert!(message.contains("Done"));
    assert!(message.contains("In Progress"));
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Delete Me")))
        .await
        .unwrap();
    let created: Task = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ack: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(ack["message"], "Task deleted successfully");

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_sort_and_clamped_pagination() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    for (entity, status) in [
        ("Filter Alpha", "Open"),
        ("Filter Bravo", "Open"),
        ("Filter Charlie", "Cancelled"),
    ] {
        let mut body = valid_task(entity);
        body["status"] = json!(status);
        let response = app.clone().oneshot(post_json("/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get(
            "/?status=Open&sort_by=entity_name&sort_order=asc&per_page=200",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["entity_name"], "Filter Alpha");
    assert_eq!(tasks[1]["entity_name"], "Filter Bravo");

    assert_eq!(body["pagination"]["per_page"], 100); // clamped from 200
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["has_next"], false);
    assert_eq!(body["pagination"]["has_prev"], false);
    assert_eq!(body["filters_applied"]["status"], "Open");
    assert_eq!(body["sort"]["sort_by"], "entity_name");
    assert_eq!(body["sort"]["sort_order"], "asc");
}

#[tokio::test]
async fn test_list_page_beyond_range_is_empty() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json("/", valid_task("Lone Task")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/?page=99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["tasks"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_list_invalid_sort_field_is_400_even_with_other_params() {
    let db = TestDatabase::new().await;

    let response = task_app(&db)
        .oneshot(get("/?status=Open&sort_by=completed_at&per_page=5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert!(error["error"].as_str().unwrap().contains("Invalid sort field"));
}

#[tokio::test]
async fn test_list_invalid_date_filter_is_400_with_format_hint() {
    let db = TestDatabase::new().await;

    let response = task_app(&db)
        .oneshot(get("/?date=2025-13-40"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "Invalid date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_bulk_create_partial_success() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let response = app
        .clone()
        .oneshot(post_json(
            "/bulk",
            json!({
                "tasks": [
                    valid_task("Bulk One"),
                    valid_task("Bulk Two"),
                    valid_task("Bulk Three"),
                    { "entity_name": "Bulk Broken", "task_type": "Call" }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let result: BulkCreateResult = json_body(response.into_body()).await;
    assert_eq!(result.created_count, 3);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.created_tasks.len(), 3);
    assert!(result.errors[0].starts_with("Task 4:"));

    // The three valid tasks landed in the store
    let response = app.oneshot(get("/?entity_name=Bulk")).await.unwrap();
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_bulk_create_total_failure_is_400() {
    let db = TestDatabase::new().await;

    let response = task_app(&db)
        .oneshot(post_json(
            "/bulk",
            json!({ "tasks": [ { "task_type": "Call" } ] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let result: BulkCreateResult = json_body(response.into_body()).await;
    assert_eq!(result.created_count, 0);
    assert_eq!(result.error_count, 1);
    assert!(result.errors[0].starts_with("Task 1:"));
}

#[tokio::test]
async fn test_stats_reflect_distribution_and_overdue() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    let today = chrono::Utc::now().date_naive();
    let yesterday = (today - chrono::Duration::days(1)).to_string();
    let tomorrow = (today + chrono::Duration::days(1)).to_string();

    let specs = [
        ("Stat One", "Meeting", "Open", yesterday.clone()),     // overdue
        ("Stat Two", "Call", "In Progress", yesterday.clone()), // overdue
        ("Stat Three", "Call", "Closed", yesterday.clone()),    // closed, not overdue
        ("Stat Four", "Email", "Open", tomorrow.clone()),       // future
    ];

    for (entity, task_type, status, due) in specs {
        let mut body = valid_task(entity);
        body["task_type"] = json!(task_type);
        body["status"] = json!(status);
        body["due_date"] = json!(due);
        let response = app.clone().oneshot(post_json("/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats: TaskStats = json_body(response.into_body()).await;
    assert_eq!(stats.total_tasks, 4);
    assert_eq!(stats.open_tasks, 2);
    assert_eq!(stats.closed_tasks, 1);
    assert_eq!(stats.in_progress_tasks, 1);
    assert_eq!(stats.overdue_tasks, 2);

    let type_sum: i64 = stats.task_types.iter().map(|c| c.count).sum();
    let status_sum: i64 = stats.statuses.iter().map(|c| c.count).sum();
    let priority_sum: i64 = stats.priorities.iter().map(|c| c.count).sum();
    assert_eq!(type_sum, 4);
    assert_eq!(status_sum, 4);
    assert_eq!(priority_sum, 4);
}

#[tokio::test]
async fn test_export_header_and_row_count() {
    let db = TestDatabase::new().await;
    let app = task_app(&db);

    for entity in ["Export One", "Export Two"] {
        let response = app
            .clone()
            .oneshot(post_json("/", valid_task(entity)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=tasks_export.csv"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Date,Entity Name,Task Type,Time,Contact Person,Note,Status,Priority,Due Date,Created At,Updated At"
    );
    assert_eq!(lines.count(), 2);
}
