use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::CoreError;

/// Storage format of task dates at every boundary.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format accepted by date searches, e.g. `08.02.2024`.
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// A stored task. `date` is always a valid `YYYYMMDD` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl Task {
    pub fn due_date(&self) -> Result<NaiveDate, CoreError> {
        parse_date(&self.date)
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// A validated task ready to be inserted.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Raw task fields as supplied by a caller, before validation.
///
/// An empty `date` means "today".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskInput {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Outcome of marking a task as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// The task repeats and was moved to its next date.
    Rescheduled(Task),
    /// The task did not repeat and was removed.
    Deleted(Task),
}

/// Wire representation of a task. Every field is text, the id included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

/// Parses a boundary date. Exactly eight ASCII digits are accepted.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| CoreError::InvalidDate(value.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_eight_digits() {
        assert_eq!(
            parse_date("20240229").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for value in ["", "2024-01-01", "2024011", "202401011", "2024O101", "20230229", "20241301"] {
            assert!(
                matches!(parse_date(value), Err(CoreError::InvalidDate(_))),
                "'{}' should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_format_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(987, 3, 4).unwrap();
        assert_eq!(format_date(date), "09870304");
    }

    #[test]
    fn test_task_dto_uses_text_id() {
        let task = Task {
            id: 42,
            date: "20240101".to_string(),
            title: "Pay rent".to_string(),
            comment: String::new(),
            repeat: "m 1".to_string(),
        };
        assert!(task.is_recurring());

        let json = serde_json::to_value(TaskDto::from(task)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "date": "20240101",
                "title": "Pay rent",
                "comment": "",
                "repeat": "m 1"
            })
        );
    }
}
