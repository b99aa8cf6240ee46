use crate::models::{TaskPriority, TaskStatus, TaskType};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub entity_name: String,
    pub task_type: TaskType,
    pub time: String,
    pub contact_person: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            entity_name: model.entity_name,
            task_type: model.task_type,
            time: model.time,
            contact_person: model.contact_person,
            note: model.note,
            status: model.status,
            priority: model.priority,
            due_date: model.due_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            completed_at: model.completed_at.map(Into::into),
        }
    }
}

// Conversion from domain CreateTask to Sea-ORM ActiveModel.
// The id stays unset so the database assigns it; date defaults to today.
impl From<crate::models::CreateTask> for ActiveModel {
    fn from(input: crate::models::CreateTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            date: Set(input.date.unwrap_or_else(|| now.date_naive())),
            entity_name: Set(input.entity_name),
            task_type: Set(input.task_type),
            time: Set(input.time),
            contact_person: Set(input.contact_person),
            note: Set(input.note),
            status: Set(input.status),
            priority: Set(input.priority),
            due_date: Set(input.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            completed_at: Set(None),
        }
    }
}

// Conversion from domain Task back to a fully-set ActiveModel, for updates
impl From<crate::models::Task> for ActiveModel {
    fn from(task: crate::models::Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            date: Set(task.date),
            entity_name: Set(task.entity_name),
            task_type: Set(task.task_type),
            time: Set(task.time),
            contact_person: Set(task.contact_person),
            note: Set(task.note),
            status: Set(task.status),
            priority: Set(task.priority),
            due_date: Set(task.due_date),
            created_at: Set(task.created_at.into()),
            updated_at: Set(task.updated_at.into()),
            completed_at: Set(task.completed_at.map(Into::into)),
        }
    }
}
