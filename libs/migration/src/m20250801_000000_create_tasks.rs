use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create task_type enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskType::Enum)
                    .values([
                        TaskType::Meeting,
                        TaskType::Call,
                        TaskType::VideoCall,
                        TaskType::Email,
                        TaskType::FollowUp,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create task_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values([
                        TaskStatus::Open,
                        TaskStatus::Closed,
                        TaskStatus::InProgress,
                        TaskStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create task_priority enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskPriority::Enum)
                    .values([
                        TaskPriority::Low,
                        TaskPriority::Medium,
                        TaskPriority::High,
                        TaskPriority::Urgent,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create tasks table
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(date(Tasks::Date))
                    .col(string_len(Tasks::EntityName, 100))
                    .col(
                        ColumnDef::new(Tasks::TaskType)
                            .enumeration(
                                TaskType::Enum,
                                [
                                    TaskType::Meeting,
                                    TaskType::Call,
                                    TaskType::VideoCall,
                                    TaskType::Email,
                                    TaskType::FollowUp,
                                ],
                            )
                            .not_null(),
                    )
                    .col(string_len(Tasks::Time, 10))
                    .col(string_len(Tasks::ContactPerson, 100))
                    .col(text_null(Tasks::Note))
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .enumeration(
                                TaskStatus::Enum,
                                [
                                    TaskStatus::Open,
                                    TaskStatus::Closed,
                                    TaskStatus::InProgress,
                                    TaskStatus::Cancelled,
                                ],
                            )
                            .not_null()
                            .default("Open"),
                    )
                    .col(
                        ColumnDef::new(Tasks::Priority)
                            .enumeration(
                                TaskPriority::Enum,
                                [
                                    TaskPriority::Low,
                                    TaskPriority::Medium,
                                    TaskPriority::High,
                                    TaskPriority::Urgent,
                                ],
                            )
                            .not_null()
                            .default("Medium"),
                    )
                    .col(date_null(Tasks::DueDate))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Tasks::CompletedAt))
                    .to_owned(),
            )
            .await?;

        // Single-column indexes on the common filter fields
        for (name, column) in [
            ("idx_tasks_date", Tasks::Date),
            ("idx_tasks_entity_name", Tasks::EntityName),
            ("idx_tasks_task_type", Tasks::TaskType),
            ("idx_tasks_contact_person", Tasks::ContactPerson),
            ("idx_tasks_status", Tasks::Status),
            ("idx_tasks_due_date", Tasks::DueDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Tasks::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // Composite indexes for the frequent filter pairs
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_date_status")
                    .table(Tasks::Table)
                    .col(Tasks::Date)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_entity_type")
                    .table(Tasks::Table)
                    .col(Tasks::EntityName)
                    .col(Tasks::TaskType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_contact_status")
                    .table(Tasks::Table)
                    .col(Tasks::ContactPerson)
                    .col(Tasks::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskPriority::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Tasks {
    Table,
    Id,
    Date,
    EntityName,
    TaskType,
    Time,
    ContactPerson,
    Note,
    Status,
    Priority,
    DueDate,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum TaskType {
    #[sea_orm(iden = "task_type")]
    Enum,
    #[sea_orm(iden = "Meeting")]
    Meeting,
    #[sea_orm(iden = "Call")]
    Call,
    #[sea_orm(iden = "Video Call")]
    VideoCall,
    #[sea_orm(iden = "Email")]
    Email,
    #[sea_orm(iden = "Follow-up")]
    FollowUp,
}

#[derive(DeriveIden)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "Open")]
    Open,
    #[sea_orm(iden = "Closed")]
    Closed,
    #[sea_orm(iden = "In Progress")]
    InProgress,
    #[sea_orm(iden = "Cancelled")]
    Cancelled,
}

#[derive(DeriveIden)]
enum TaskPriority {
    #[sea_orm(iden = "task_priority")]
    Enum,
    #[sea_orm(iden = "Low")]
    Low,
    #[sea_orm(iden = "Medium")]
    Medium,
    #[sea_orm(iden = "High")]
    High,
    #[sea_orm(iden = "Urgent")]
    Urgent,
}
