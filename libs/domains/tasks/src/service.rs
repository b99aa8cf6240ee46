use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{
    BulkCreateResult, CreateTask, Task, TaskStats, TaskStatus, UpdateTask,
};
use crate::query::{TaskFilter, TaskPage};
use crate::repository::TaskRepository;

/// First field-level message from a validator failure. The DTOs attach an
/// explicit message to every rule, so the Display fallback is defensive
/// only.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with strict validation
    #[instrument(skip(self, input), fields(entity_name = %input.entity_name))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(validation_message(&e)))?;

        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List one page of tasks matching the filter
    pub async fn list_tasks(&self, filter: TaskFilter) -> TaskResult<TaskPage> {
        self.repository.list(filter).await
    }

    /// Apply a partial update with lenient validation
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: i32, input: UpdateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(validation_message(&e)))?;

        self.repository.update(id, input).await
    }

    /// Change only the status; `completed_at` follows the Closed invariant
    #[instrument(skip(self), fields(task_id = %id, status = %status))]
    pub async fn update_status(&self, id: i32, status: TaskStatus) -> TaskResult<Task> {
        self.repository
            .update(
                id,
                UpdateTask {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }

    /// Create many tasks at once.
    ///
    /// Each raw item is deserialized and validated independently; invalid
    /// items produce a per-index error message ("Task 3: ...") and do not
    /// block the rest. The valid items are persisted in one transaction.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn bulk_create(&self, items: Vec<serde_json::Value>) -> TaskResult<BulkCreateResult> {
        let mut valid = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<CreateTask>(item) {
                Err(e) => errors.push(format!("Task {}: {}", index + 1, e)),
                Ok(input) => match input.validate() {
                    Err(e) => {
                        errors.push(format!("Task {}: {}", index + 1, validation_message(&e)))
                    }
                    Ok(()) => valid.push(input),
                },
            }
        }

        let created_tasks = if valid.is_empty() {
            Vec::new()
        } else {
            self.repository.create_many(valid).await?
        };

        Ok(BulkCreateResult {
            created_count: created_tasks.len(),
            error_count: errors.len(),
            created_tasks,
            errors,
        })
    }

    /// Aggregate statistics; "today" for the overdue count is the current
    /// UTC date at call time, never cached
    pub async fn stats(&self) -> TaskResult<TaskStats> {
        self.repository.stats(Utc::now().date_naive()).await
    }

    /// All tasks ordered by id, for CSV export
    pub async fn export_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.all_ordered().await
    }

    /// Total task count
    pub async fn count_tasks(&self) -> TaskResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskType};
    use crate::repository::MockTaskRepository;
    use chrono::NaiveDate;
    use serde_json::json;

    fn stored_task(id: i32) -> Task {
        Task {
            id,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            entity_name: "Acme Corp".to_string(),
            task_type: TaskType::Meeting,
            time: "09:30".to_string(),
            contact_person: "Jane Doe".to_string(),
            note: None,
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: None,
        }
    }

    fn valid_payload(entity: &str) -> serde_json::Value {
        json!({
            "entity_name": entity,
            "task_type": "Call",
            "time": "10:00",
            "contact_person": "Jane Doe"
        })
    }

    #[tokio::test]
    async fn test_create_task_rejects_invalid_time_before_repository() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_create().never();

        let service = TaskService::new(mock_repo);
        let input = CreateTask {
            date: None,
            entity_name: "Acme".to_string(),
            task_type: TaskType::Call,
            time: "25:00".to_string(),
            contact_person: "Jane".to_string(),
            note: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
        };

        let err = service.create_task(input).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!(err.to_string().contains("HH:MM"));
    }

    #[tokio::test]
    async fn test_get_task_maps_missing_row_to_not_found() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(42))
            .returning(|_| Ok(None));

        let service = TaskService::new(mock_repo);
        let err = service.get_task(42).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_task_maps_zero_rows_to_not_found() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = TaskService::new(mock_repo);
        let err = service.delete_task(7).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_update_status_routes_through_partial_update() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, input| {
                *id == 5
                    && input.status == Some(TaskStatus::Closed)
                    && input.entity_name.is_none()
                    && input.time.is_none()
            })
            .returning(|id, _| {
                let mut task = stored_task(id);
                task.set_status(TaskStatus::Closed);
                Ok(task)
            });

        let service = TaskService::new(mock_repo);
        let task = service.update_status(5, TaskStatus::Closed).await.unwrap();
        assert_eq!(task.status, TaskStatus::Closed);
        assert!(task.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_update_task_rejects_oversized_note() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_update().never();

        let service = TaskService::new(mock_repo);
        let err = service
            .update_task(
                1,
                UpdateTask {
                    note: Some("x".repeat(1001)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("1000"));
    }

    #[tokio::test]
    async fn test_bulk_create_partial_success() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_create_many()
            .withf(|inputs| inputs.len() == 3)
            .returning(|inputs| {
                Ok(inputs
                    .iter()
                    .enumerate()
                    .map(|(i, _)| stored_task(i as i32 + 1))
                    .collect())
            });

        let service = TaskService::new(mock_repo);
        let items = vec![
            valid_payload("One"),
            json!({"entity_name": "Two", "task_type": "Call"}), // missing time + contact
            valid_payload("Three"),
            valid_payload("Four"),
        ];

        let result = service.bulk_create(items).await.unwrap();
        assert_eq!(result.created_count, 3);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Task 2:"));
    }

    #[tokio::test]
    async fn test_bulk_create_all_invalid_skips_repository() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_create_many().never();

        let service = TaskService::new(mock_repo);
        let items = vec![
            json!({"task_type": "Call"}),
            json!({"entity_name": "Acme", "task_type": "Pager", "time": "10:00", "contact_person": "J"}),
        ];

        let result = service.bulk_create(items).await.unwrap();
        assert_eq!(result.created_count, 0);
        assert_eq!(result.error_count, 2);
        assert!(result.errors[0].starts_with("Task 1:"));
        assert!(result.errors[1].starts_with("Task 2:"));
    }

    #[tokio::test]
    async fn test_bulk_create_validation_is_per_index() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_create_many()
            .returning(|inputs| {
                Ok(inputs
                    .iter()
                    .enumerate()
                    .map(|(i, _)| stored_task(i as i32 + 1))
                    .collect())
            });

        let service = TaskService::new(mock_repo);
        let mut bad_time = valid_payload("Two");
        bad_time["time"] = json!("25:61");
        let items = vec![valid_payload("One"), bad_time];

        let result = service.bulk_create(items).await.unwrap();
        assert_eq!(result.created_count, 1);
        assert!(result.errors[0].contains("Task 2:"));
        assert!(result.errors[0].contains("HH:MM"));
    }

    #[tokio::test]
    async fn test_stats_uses_current_date() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_stats()
            .withf(|today| *today == Utc::now().date_naive())
            .returning(|_| {
                Ok(TaskStats {
                    total_tasks: 0,
                    open_tasks: 0,
                    closed_tasks: 0,
                    in_progress_tasks: 0,
                    overdue_tasks: 0,
                    task_types: vec![],
                    priorities: vec![],
                    statuses: vec![],
                })
            });

        let service = TaskService::new(mock_repo);
        assert!(service.stats().await.is_ok());
    }
}
