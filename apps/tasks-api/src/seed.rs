//! One-time sample data loader.
//!
//! Runs at startup and only inserts when the task store is empty, so a
//! restart never duplicates data.

use chrono::NaiveDate;
use domain_tasks::{
    CreateTask, PgTaskRepository, TaskPriority, TaskService, TaskStatus, TaskType,
};
use sea_orm::DatabaseConnection;
use tracing::info;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

fn sample_tasks() -> Vec<CreateTask> {
    let lorem = "Lorem ipsum dolor sit amet, consectetur adipisc...";

    vec![
        CreateTask {
            date: Some(day(2019, 3, 12)),
            entity_name: "PQR Private Limited".to_string(),
            task_type: TaskType::Meeting,
            time: "13:00".to_string(),
            contact_person: "Sanna Stark".to_string(),
            note: Some(lorem.to_string()),
            status: TaskStatus::Open,
            priority: TaskPriority::High,
            due_date: Some(day(2019, 3, 15)),
        },
        CreateTask {
            date: Some(day(2019, 3, 12)),
            entity_name: "STU Private Limited".to_string(),
            task_type: TaskType::Call,
            time: "13:00".to_string(),
            contact_person: "Frodo Baggins".to_string(),
            note: Some(lorem.to_string()),
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            due_date: Some(day(2019, 3, 14)),
        },
        CreateTask {
            date: Some(day(2019, 3, 12)),
            entity_name: "ABC Private Limited".to_string(),
            task_type: TaskType::Call,
            time: "13:00".to_string(),
            contact_person: "Sarah Connor".to_string(),
            note: Some(lorem.to_string()),
            status: TaskStatus::Closed,
            priority: TaskPriority::Low,
            due_date: Some(day(2019, 3, 13)),
        },
        CreateTask {
            date: Some(day(2019, 3, 12)),
            entity_name: "ABC Private Limited".to_string(),
            task_type: TaskType::Meeting,
            time: "13:00".to_string(),
            contact_person: "Bilbo Baggins".to_string(),
            note: Some(lorem.to_string()),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: Some(day(2019, 3, 16)),
        },
        CreateTask {
            date: Some(day(2019, 3, 12)),
            entity_name: "DEF Private Limited".to_string(),
            task_type: TaskType::Call,
            time: "13:00".to_string(),
            contact_person: "Peregrin Took".to_string(),
            note: Some(lorem.to_string()),
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            due_date: Some(day(2019, 3, 17)),
        },
        CreateTask {
            date: Some(day(2019, 3, 13)),
            entity_name: "GHI Private Limited".to_string(),
            task_type: TaskType::VideoCall,
            time: "14:00".to_string(),
            contact_person: "Ned Stark".to_string(),
            note: Some("Follow-up meeting for project discussion".to_string()),
            status: TaskStatus::Open,
            priority: TaskPriority::Urgent,
            due_date: Some(day(2019, 3, 18)),
        },
        CreateTask {
            date: Some(day(2019, 3, 13)),
            entity_name: "JKL Private Limited".to_string(),
            task_type: TaskType::Email,
            time: "15:00".to_string(),
            contact_person: "Jon Snow".to_string(),
            note: Some("Send project proposal and timeline".to_string()),
            status: TaskStatus::Open,
            priority: TaskPriority::Medium,
            due_date: Some(day(2019, 3, 19)),
        },
    ]
}

/// Insert the sample data set when the store is empty at startup.
pub async fn seed_if_empty(db: &DatabaseConnection) -> eyre::Result<()> {
    let service = TaskService::new(PgTaskRepository::new(db.clone()));

    if service.count_tasks().await? > 0 {
        return Ok(());
    }

    info!("Task store is empty, loading sample data");

    for input in sample_tasks() {
        let status = input.status;
        let task = service.create_task(input).await?;

        // Creation never stamps completed_at; route Closed samples through
        // the status transition so the invariant holds for them too.
        if status == TaskStatus::Closed {
            service.update_status(task.id, TaskStatus::Closed).await?;
        }
    }

    info!("Sample data created successfully");
    Ok(())
}
