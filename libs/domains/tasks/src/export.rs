//! CSV export of the task collection.

use crate::error::{TaskError, TaskResult};
use crate::models::Task;

/// Fixed column layout of the export file
pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Date",
    "Entity Name",
    "Task Type",
    "Time",
    "Contact Person",
    "Note",
    "Status",
    "Priority",
    "Due Date",
    "Created At",
    "Updated At",
];

/// Render tasks as CSV with a header row, one row per task.
///
/// Optional fields render as empty cells; dates use ISO 8601.
pub fn tasks_to_csv(tasks: &[Task]) -> TaskResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| TaskError::Internal(format!("CSV write error: {}", e)))?;

    for task in tasks {
        writer
            .write_record([
                task.id.to_string(),
                task.date.to_string(),
                task.entity_name.clone(),
                task.task_type.to_string(),
                task.time.clone(),
                task.contact_person.clone(),
                task.note.clone().unwrap_or_default(),
                task.status.to_string(),
                task.priority.to_string(),
                task.due_date.map(|d| d.to_string()).unwrap_or_default(),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ])
            .map_err(|e| TaskError::Internal(format!("CSV write error: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| TaskError::Internal(format!("CSV write error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus, TaskType};
    use chrono::{NaiveDate, Utc};

    fn task(id: i32, note: Option<&str>) -> Task {
        Task {
            id,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            entity_name: "Acme Corp".to_string(),
            task_type: TaskType::VideoCall,
            time: "14:00".to_string(),
            contact_person: "Jane Doe".to_string(),
            note: note.map(String::from),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_header_row_matches_fixed_layout() {
        let csv = tasks_to_csv(&[]).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "ID,Date,Entity Name,Task Type,Time,Contact Person,Note,Status,Priority,Due Date,Created At,Updated At"
        );
    }

    #[test]
    fn test_row_count_matches_task_count() {
        let tasks = vec![task(1, None), task(2, Some("call back")), task(3, None)];
        let csv = tasks_to_csv(&tasks).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert_eq!(text.lines().count(), 4); // header + 3 rows
    }

    #[test]
    fn test_enum_and_date_cells_use_wire_values() {
        let csv = tasks_to_csv(&[task(1, None)]).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("1,2025-06-01,Acme Corp,Video Call,14:00,Jane Doe,"));
        assert!(row.contains("In Progress"));
        assert!(row.contains("High"));
        assert!(row.contains("2025-06-15"));
    }

    #[test]
    fn test_missing_note_renders_empty_cell() {
        let csv = tasks_to_csv(&[task(1, None)]).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("Jane Doe,,"));
    }

    #[test]
    fn test_note_with_comma_is_quoted() {
        let csv = tasks_to_csv(&[task(1, Some("first, second"))]).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.contains("\"first, second\""));
    }
}
