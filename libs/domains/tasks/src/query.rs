//! List-query construction: filter parsing, sort-field whitelisting, and
//! pagination.
//!
//! Raw query parameters arrive as strings ([`TaskListParams`]) and are
//! converted into a typed [`TaskFilter`] before anything touches the
//! database. Malformed dates, unknown enum values and non-whitelisted sort
//! fields are rejected here with a client error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::{IntoParams, ToSchema};

use crate::error::TaskError;
use crate::models::{Task, TaskPriority, TaskStatus, TaskType};

/// Default page size when `per_page` is absent
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Hard cap on page size
pub const MAX_PER_PAGE: u64 = 100;

/// Raw query parameters of `GET /tasks`.
///
/// Everything is kept as strings so parsing happens in one place, with
/// field-specific error messages, rather than in the extractor.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TaskListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub entity_name: Option<String>,
    pub task_type: Option<String>,
    pub status: Option<String>,
    pub contact_person: Option<String>,
    pub priority: Option<String>,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Fields a task list may be sorted by.
///
/// An explicit allow-list: `note` and `completed_at` are deliberately not
/// sortable, and unknown names are a caller error.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    Id,
    Date,
    EntityName,
    TaskType,
    Time,
    ContactPerson,
    Status,
    Priority,
    CreatedAt,
    UpdatedAt,
    DueDate,
}

impl SortField {
    pub fn allowed() -> String {
        Self::iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Sort direction. Absent defaults to descending; `desc`
/// (case-insensitive) sorts descending and anything else ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: Option<&str>) -> Self {
        match value {
            None => SortOrder::Desc,
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            Some(_) => SortOrder::Asc,
        }
    }
}

/// Typed, validated list query: filters + sort + pagination.
///
/// All supplied filters are ANDed. Substring filters (`entity_name`,
/// `contact_person`) are case-insensitive partial matches; the rest are
/// exact equality.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFilter {
    pub entity_name: Option<String>,
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub contact_person: Option<String>,
    pub priority: Option<TaskPriority>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub per_page: u64,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            entity_name: None,
            task_type: None,
            status: None,
            contact_person: None,
            priority: None,
            date: None,
            due_date: None,
            sort_by: SortField::Date,
            sort_order: SortOrder::Desc,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn parse_date(value: &str, message: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| TaskError::Validation(message.to_string()))
}

/// Numeric query parameters are tolerant: unparseable values fall back to
/// their default instead of erroring.
fn parse_or_default(value: Option<&str>, default: u64) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl TryFrom<TaskListParams> for TaskFilter {
    type Error = TaskError;

    fn try_from(params: TaskListParams) -> Result<Self, Self::Error> {
        let page = parse_or_default(params.page.as_deref(), 1).max(1);
        let per_page =
            parse_or_default(params.per_page.as_deref(), DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

        let task_type = params
            .task_type
            .as_deref()
            .map(|v| {
                v.parse::<TaskType>().map_err(|_| {
                    TaskError::Validation(format!(
                        "Task type must be one of: {}",
                        TaskType::allowed()
                    ))
                })
            })
            .transpose()?;

        let status = params
            .status
            .as_deref()
            .map(|v| {
                v.parse::<TaskStatus>().map_err(|_| {
                    TaskError::Validation(format!("Status must be one of: {}", TaskStatus::allowed()))
                })
            })
            .transpose()?;

        let priority = params
            .priority
            .as_deref()
            .map(|v| {
                v.parse::<TaskPriority>().map_err(|_| {
                    TaskError::Validation(format!(
                        "Priority must be one of: {}",
                        TaskPriority::allowed()
                    ))
                })
            })
            .transpose()?;

        let date = params
            .date
            .as_deref()
            .map(|v| parse_date(v, "Invalid date format. Use YYYY-MM-DD"))
            .transpose()?;

        let due_date = params
            .due_date
            .as_deref()
            .map(|v| parse_date(v, "Invalid due_date format. Use YYYY-MM-DD"))
            .transpose()?;

        let sort_by = params
            .sort_by
            .as_deref()
            .map(|v| {
                v.parse::<SortField>().map_err(|_| {
                    TaskError::Validation(format!(
                        "Invalid sort field '{}'. Valid fields: {}",
                        v,
                        SortField::allowed()
                    ))
                })
            })
            .transpose()?
            .unwrap_or(SortField::Date);

        let sort_order = SortOrder::parse(params.sort_order.as_deref());

        Ok(Self {
            entity_name: params.entity_name,
            task_type,
            status,
            contact_person: params.contact_person,
            priority,
            date,
            due_date,
            sort_by,
            sort_order,
            page,
            per_page,
        })
    }
}

/// One page of tasks, as returned by the repository
#[derive(Debug, Clone, Default)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total: u64,
    pub pages: u64,
}

/// Pagination metadata echoed to the client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_num: Option<u64>,
    pub prev_num: Option<u64>,
}

impl PaginationInfo {
    pub fn new(page: u64, per_page: u64, total: u64, pages: u64) -> Self {
        let has_next = page < pages;
        let has_prev = page > 1;
        Self {
            page,
            pages,
            per_page,
            total,
            has_next,
            has_prev,
            next_num: has_next.then(|| page + 1),
            prev_num: has_prev.then(|| page - 1),
        }
    }
}

/// Echo of the filters that were actually applied to a list query
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl From<&TaskFilter> for AppliedFilters {
    fn from(filter: &TaskFilter) -> Self {
        Self {
            entity_name: filter.entity_name.clone(),
            task_type: filter.task_type,
            status: filter.status,
            contact_person: filter.contact_person.clone(),
            priority: filter.priority,
            date: filter.date,
            due_date: filter.due_date,
        }
    }
}

/// Sort echo included in list responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SortInfo {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Body of `GET /tasks`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub pagination: PaginationInfo,
    pub filters_applied: AppliedFilters,
    pub sort: SortInfo,
}

impl TaskListResponse {
    pub fn new(page: TaskPage, filter: &TaskFilter) -> Self {
        Self {
            tasks: page.items,
            pagination: PaginationInfo::new(filter.page, filter.per_page, page.total, page.pages),
            filters_applied: AppliedFilters::from(filter),
            sort: SortInfo {
                sort_by: filter.sort_by,
                sort_order: filter.sort_order,
            },
        }
    }
}
