use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, TaskStats, UpdateTask};
use crate::query::{TaskFilter, TaskPage};

/// Repository trait for Task persistence.
///
/// Defines the data access interface; implementations can use different
/// storage backends (PostgreSQL in production, mocks in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Create several tasks in one transaction; all inserts succeed or none do
    async fn create_many(&self, inputs: Vec<CreateTask>) -> TaskResult<Vec<Task>>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// List one page of tasks matching the filter
    async fn list(&self, filter: TaskFilter) -> TaskResult<TaskPage>;

    /// Apply a partial update to an existing task
    async fn update(&self, id: i32, input: UpdateTask) -> TaskResult<Task>;

    /// Delete a task by ID; false when no row matched
    async fn delete(&self, id: i32) -> TaskResult<bool>;

    /// Aggregate counts; `today` anchors the overdue computation
    async fn stats(&self, today: NaiveDate) -> TaskResult<TaskStats>;

    /// All tasks ordered by id, for export
    async fn all_ordered(&self) -> TaskResult<Vec<Task>>;

    /// Total row count, used by the startup seed check
    async fn count(&self) -> TaskResult<u64>;
}
