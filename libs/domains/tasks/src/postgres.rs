use async_trait::async_trait;
use chrono::NaiveDate;
use database::BaseRepository;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{
        CreateTask, PriorityCount, StatusCount, Task, TaskPriority, TaskStats, TaskStatus,
        TaskType, TypeCount, UpdateTask,
    },
    query::{SortField, SortOrder, TaskFilter, TaskPage},
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Date => entity::Column::Date,
        SortField::EntityName => entity::Column::EntityName,
        SortField::TaskType => entity::Column::TaskType,
        SortField::Time => entity::Column::Time,
        SortField::ContactPerson => entity::Column::ContactPerson,
        SortField::Status => entity::Column::Status,
        SortField::Priority => entity::Column::Priority,
        SortField::CreatedAt => entity::Column::CreatedAt,
        SortField::UpdatedAt => entity::Column::UpdatedAt,
        SortField::DueDate => entity::Column::DueDate,
    }
}

/// Compose the ANDed filter predicates onto a select
fn apply_filters(
    mut query: sea_orm::Select<entity::Entity>,
    filter: &TaskFilter,
) -> sea_orm::Select<entity::Entity> {
    if let Some(entity_name) = &filter.entity_name {
        query = query
            .filter(Expr::col(entity::Column::EntityName).ilike(format!("%{}%", entity_name)));
    }
    if let Some(task_type) = filter.task_type {
        query = query.filter(entity::Column::TaskType.eq(task_type));
    }
    if let Some(status) = filter.status {
        query = query.filter(entity::Column::Status.eq(status));
    }
    if let Some(contact_person) = &filter.contact_person {
        query = query.filter(
            Expr::col(entity::Column::ContactPerson).ilike(format!("%{}%", contact_person)),
        );
    }
    if let Some(priority) = filter.priority {
        query = query.filter(entity::Column::Priority.eq(priority));
    }
    if let Some(date) = filter.date {
        query = query.filter(entity::Column::Date.eq(date));
    }
    if let Some(due_date) = filter.due_date {
        query = query.filter(entity::Column::DueDate.eq(due_date));
    }
    query
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn create_many(&self, inputs: Vec<CreateTask>) -> TaskResult<Vec<Task>> {
        let txn = self.base.db().begin().await?;

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let active_model: entity::ActiveModel = input.into();
            // A failed insert drops the transaction, rolling back the batch
            let model = active_model.insert(&txn).await?;
            created.push(Task::from(model));
        }

        txn.commit().await?;

        tracing::info!(count = created.len(), "Bulk created tasks");
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: TaskFilter) -> TaskResult<TaskPage> {
        let mut query = apply_filters(entity::Entity::find(), &filter);

        let column = sort_column(filter.sort_by);
        query = match filter.sort_order {
            SortOrder::Asc => query.order_by_asc(column),
            SortOrder::Desc => query.order_by_desc(column),
        };

        let paginator = query.paginate(self.base.db(), filter.per_page);
        let counts = paginator.num_items_and_pages().await?;

        // fetch_page is zero-based; out-of-range pages yield an empty list
        let models = paginator.fetch_page(filter.page.saturating_sub(1)).await?;

        Ok(TaskPage {
            items: models.into_iter().map(Into::into).collect(),
            total: counts.number_of_items,
            pages: counts.number_of_pages,
        })
    }

    async fn update(&self, id: i32, input: UpdateTask) -> TaskResult<Task> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model: entity::ActiveModel = task.into();
        let updated_model = self.base.update(active_model).await?;

        tracing::info!(task_id = id, "Updated task");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn stats(&self, today: NaiveDate) -> TaskResult<TaskStats> {
        let db = self.base.db();

        let total = entity::Entity::find().count(db).await?;

        let by_status: Vec<(TaskStatus, i64)> = entity::Entity::find()
            .select_only()
            .column(entity::Column::Status)
            .column_as(entity::Column::Id.count(), "count")
            .group_by(entity::Column::Status)
            .into_tuple()
            .all(db)
            .await?;

        let by_type: Vec<(TaskType, i64)> = entity::Entity::find()
            .select_only()
            .column(entity::Column::TaskType)
            .column_as(entity::Column::Id.count(), "count")
            .group_by(entity::Column::TaskType)
            .into_tuple()
            .all(db)
            .await?;

        let by_priority: Vec<(TaskPriority, i64)> = entity::Entity::find()
            .select_only()
            .column(entity::Column::Priority)
            .column_as(entity::Column::Id.count(), "count")
            .group_by(entity::Column::Priority)
            .into_tuple()
            .all(db)
            .await?;

        let overdue = entity::Entity::find()
            .filter(entity::Column::DueDate.lt(today))
            .filter(entity::Column::Status.is_in([TaskStatus::Open, TaskStatus::InProgress]))
            .count(db)
            .await?;

        let status_count = |status: TaskStatus| -> u64 {
            by_status
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, count)| *count as u64)
                .unwrap_or(0)
        };

        Ok(TaskStats {
            total_tasks: total,
            open_tasks: status_count(TaskStatus::Open),
            closed_tasks: status_count(TaskStatus::Closed),
            in_progress_tasks: status_count(TaskStatus::InProgress),
            overdue_tasks: overdue,
            task_types: by_type
                .into_iter()
                .map(|(task_type, count)| TypeCount { task_type, count })
                .collect(),
            priorities: by_priority
                .into_iter()
                .map(|(priority, count)| PriorityCount { priority, count })
                .collect(),
            statuses: by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        })
    }

    async fn all_ordered(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> TaskResult<u64> {
        let count = entity::Entity::find().count(self.base.db()).await?;
        Ok(count)
    }
}
