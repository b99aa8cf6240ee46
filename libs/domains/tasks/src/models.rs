use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{DeriveActiveEnum, EnumIter, Iterable};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 24-hour `HH:MM`, leading zero optional on the hour
static TIME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

fn validate_time_format(time: &str) -> Result<(), ValidationError> {
    if TIME_FORMAT.is_match(time) {
        Ok(())
    } else {
        let mut error = ValidationError::new("time_format");
        error.message = Some("Time must be in HH:MM format".into());
        Err(error)
    }
}

/// Kind of interaction a task represents
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_type")]
pub enum TaskType {
    #[sea_orm(string_value = "Meeting")]
    Meeting,
    #[sea_orm(string_value = "Call")]
    Call,
    #[serde(rename = "Video Call")]
    #[strum(serialize = "Video Call")]
    #[sea_orm(string_value = "Video Call")]
    VideoCall,
    #[sea_orm(string_value = "Email")]
    Email,
    #[serde(rename = "Follow-up")]
    #[strum(serialize = "Follow-up")]
    #[sea_orm(string_value = "Follow-up")]
    FollowUp,
}

/// Task lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "Closed")]
    Closed,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    #[sea_orm(string_value = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
pub enum TaskPriority {
    #[sea_orm(string_value = "Low")]
    Low,
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "High")]
    High,
    #[sea_orm(string_value = "Urgent")]
    Urgent,
}

impl TaskType {
    /// Accepted wire values, for validation messages
    pub fn allowed() -> String {
        Self::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TaskStatus {
    pub fn allowed() -> String {
        Self::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TaskPriority {
    pub fn allowed() -> String {
        Self::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Task entity - a dated action item tied to a contact/entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, database-assigned
    pub id: i32,
    /// Calendar date the task is scheduled for
    pub date: NaiveDate,
    /// Name of the company or entity the task concerns
    pub entity_name: String,
    pub task_type: TaskType,
    /// Time of day in `HH:MM`
    pub time: String,
    pub contact_person: String,
    pub note: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while status is Closed, cleared otherwise
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Change status, keeping `completed_at` in sync: a transition to
    /// Closed stamps the completion time, any other transition clears it.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        if status == TaskStatus::Closed {
            self.completed_at = Some(Utc::now());
        } else {
            self.completed_at = None;
        }
        self.updated_at = Utc::now();
    }

    /// Apply a partial update; only supplied fields change
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(entity_name) = update.entity_name {
            self.entity_name = entity_name;
        }
        if let Some(task_type) = update.task_type {
            self.task_type = task_type;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(contact_person) = update.contact_person {
            self.contact_person = contact_person;
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(status) = update.status {
            self.set_status(status);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new task.
///
/// `entity_name`, `task_type`, `time` and `contact_person` are required;
/// `date` defaults to today, `status` to Open and `priority` to Medium.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100, message = "Entity name must be 1-100 characters"))]
    pub entity_name: String,
    pub task_type: TaskType,
    #[validate(custom(function = validate_time_format))]
    pub time: String,
    #[validate(length(min = 1, max = 100, message = "Contact person must be 1-100 characters"))]
    pub contact_person: String,
    #[validate(length(max = 1000, message = "Note must be 1000 characters or less"))]
    pub note: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// DTO for partially updating an existing task.
///
/// Every field is optional; present fields are validated with the same
/// rules as creation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100, message = "Entity name must be 1-100 characters"))]
    pub entity_name: Option<String>,
    pub task_type: Option<TaskType>,
    #[validate(custom(function = validate_time_format))]
    pub time: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Contact person must be 1-100 characters"))]
    pub contact_person: Option<String>,
    #[validate(length(max = 1000, message = "Note must be 1000 characters or less"))]
    pub note: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// Body of `PATCH /tasks/{id}/status`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Body of `POST /tasks/bulk`.
///
/// Items stay as raw JSON so each can be deserialized and validated
/// independently; one malformed item must not fail the whole batch.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkCreateTasks {
    #[schema(value_type = Vec<CreateTask>)]
    pub tasks: Vec<serde_json::Value>,
}

/// Outcome of a bulk create: created rows plus per-index error messages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkCreateResult {
    pub created_count: usize,
    pub error_count: usize,
    pub created_tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Count of tasks per type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub count: i64,
}

/// Count of tasks per priority
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriorityCount {
    pub priority: TaskPriority,
    pub count: i64,
}

/// Count of tasks per status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: i64,
}

/// Aggregate task statistics.
///
/// `overdue_tasks` counts tasks whose due date is strictly before the
/// caller's current date while still Open or In Progress.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskStats {
    pub total_tasks: u64,
    pub open_tasks: u64,
    pub closed_tasks: u64,
    pub in_progress_tasks: u64,
    pub overdue_tasks: u64,
    pub task_types: Vec<TypeCount>,
    pub priorities: Vec<PriorityCount>,
    pub statuses: Vec<StatusCount>,
}

/// Acknowledgment body for deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
