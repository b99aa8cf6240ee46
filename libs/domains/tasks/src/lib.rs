//! Tasks Domain
//!
//! Complete domain implementation for the task resource: filtering, sorting
//! and pagination, aggregate statistics, bulk insert, and CSV export.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP surface (axum)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, enums, query builder
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//! let repository = PgTaskRepository::new(db);
//! let service = TaskService::new(repository);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::{
    BulkCreateResult, BulkCreateTasks, CreateTask, Task, TaskPriority, TaskStats, TaskStatus,
    TaskType, UpdateTask, UpdateTaskStatus,
};
pub use postgres::PgTaskRepository;
pub use query::{SortField, SortOrder, TaskFilter, TaskListParams, TaskListResponse, TaskPage};
pub use repository::TaskRepository;
pub use service::TaskService;
