//! Task-level scheduling rules on top of a [`TaskRepository`].
//!
//! The planner is where the recurrence calculator meets stored tasks: it
//! normalizes dates when tasks are written and moves recurring tasks forward
//! when they are completed. Callers pass "today" explicitly.

use chrono::NaiveDate;

use crate::error::{CoreError, RuleError};
use crate::models::{format_date, parse_date, CompletionResult, NewTask, Task, TaskInput, SEARCH_DATE_FORMAT};
use crate::recurrence;
use crate::repository::TaskRepository;
use crate::rule;

pub const DEFAULT_LIST_LIMIT: u32 = 50;

pub struct Planner<R> {
    repo: R,
    list_limit: u32,
}

impl<R: TaskRepository + Send + Sync> Planner<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn add_task(&self, input: TaskInput, today: NaiveDate) -> Result<Task, CoreError> {
        let task = prepare_task(input, today)?;
        self.repo.add_task(task).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_task(&self, id: i64, input: TaskInput, today: NaiveDate) -> Result<Task, CoreError> {
        let prepared = prepare_task(input, today)?;
        let task = Task {
            id,
            date: prepared.date,
            title: prepared.title,
            comment: prepared.comment,
            repeat: prepared.repeat,
        };
        self.repo.update_task(&task).await
    }

    pub async fn find_task(&self, id: i64) -> Result<Task, CoreError> {
        self.repo
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Lists upcoming tasks, or searches when `search` is given.
    ///
    /// A search in `DD.MM.YYYY` form selects tasks on that date; anything
    /// else matches against titles and comments.
    pub async fn list_tasks(&self, search: Option<&str>, today: NaiveDate) -> Result<Vec<Task>, CoreError> {
        match search {
            None => self.repo.find_upcoming_tasks(today, self.list_limit).await,
            Some(text) => match NaiveDate::parse_from_str(text, SEARCH_DATE_FORMAT) {
                Ok(date) => self.repo.find_tasks_by_date(date, self.list_limit).await,
                Err(_) => self.repo.search_tasks(text, self.list_limit).await,
            },
        }
    }

    /// Marks a task as done.
    ///
    /// A recurring task moves to its next date after `today`, stepping from
    /// its stored date; any other task is deleted.
    #[tracing::instrument(skip(self))]
    pub async fn complete_task(&self, id: i64, today: NaiveDate) -> Result<CompletionResult, CoreError> {
        let mut task = self.find_task(id).await?;

        if !task.is_recurring() {
            self.repo.delete_task(task.id).await?;
            tracing::debug!("one-off task removed");
            return Ok(CompletionResult::Deleted(task));
        }

        let next = recurrence::next_date_from_str(task.due_date()?, today, &task.repeat)?;
        task.date = format_date(next);
        let task = self.repo.update_task(&task).await?;

        tracing::debug!(next = %task.date, "recurring task rescheduled");
        Ok(CompletionResult::Rescheduled(task))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        self.repo.delete_task(id).await
    }
}

/// Validates raw task fields and settles the date to store.
///
/// An empty date means today. A date in the past becomes today for one-off
/// tasks, or the next occurrence after today for recurring ones. The repeat
/// rule is validated even when the date needs no change.
pub fn prepare_task(input: TaskInput, today: NaiveDate) -> Result<NewTask, CoreError> {
    if input.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("Task title must not be empty".to_string()));
    }

    let mut date = if input.date.is_empty() {
        today
    } else {
        parse_date(&input.date)?
    };

    let rule = match rule::parse(&input.repeat) {
        Ok(rule) => Some(rule),
        Err(RuleError::EmptyRule) => None,
        Err(e) => return Err(e.into()),
    };

    if date < today {
        date = match &rule {
            Some(rule) => {
                let next = recurrence::next_date(date, today, rule)?;
                tracing::debug!(from = %date, to = %next, "past recurring task moved forward");
                next
            }
            None => today,
        };
    }

    Ok(NewTask {
        date: format_date(date),
        title: input.title,
        comment: input.comment,
        repeat: input.repeat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(date: &str, repeat: &str) -> TaskInput {
        TaskInput {
            date: date.to_string(),
            title: "Water the plants".to_string(),
            comment: String::new(),
            repeat: repeat.to_string(),
        }
    }

    mod prepare_task_tests {
        use super::*;

        #[test]
        fn test_empty_title_rejected() {
            let mut data = input("", "");
            data.title = "  ".to_string();
            let result = prepare_task(data, day(2024, 1, 20));
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }

        #[test]
        fn test_empty_date_is_today() {
            let task = prepare_task(input("", ""), day(2024, 1, 20)).unwrap();
            assert_eq!(task.date, "20240120");
        }

        #[test]
        fn test_future_date_kept() {
            let task = prepare_task(input("20240301", "d 5"), day(2024, 1, 20)).unwrap();
            assert_eq!(task.date, "20240301");
        }

        #[test]
        fn test_today_kept_for_recurring_task() {
            let task = prepare_task(input("20240120", "d 5"), day(2024, 1, 20)).unwrap();
            assert_eq!(task.date, "20240120");
        }

        #[test]
        fn test_past_one_off_moves_to_today() {
            let task = prepare_task(input("20230101", ""), day(2024, 1, 20)).unwrap();
            assert_eq!(task.date, "20240120");
        }

        #[test]
        fn test_past_recurring_moves_to_next_occurrence() {
            let task = prepare_task(input("20240113", "d 3"), day(2024, 1, 20)).unwrap();
            assert_eq!(task.date, "20240122");
            assert_eq!(task.repeat, "d 3");
        }

        #[test]
        fn test_invalid_date_rejected() {
            let result = prepare_task(input("2024-01-13", ""), day(2024, 1, 20));
            assert!(matches!(result, Err(CoreError::InvalidDate(_))));
        }

        #[test]
        fn test_invalid_rule_rejected_even_for_future_dates() {
            let result = prepare_task(input("20250101", "d 401"), day(2024, 1, 20));
            assert!(matches!(
                result,
                Err(CoreError::Rule(RuleError::OutOfRangeValue { .. }))
            ));

            let result = prepare_task(input("20250101", "q"), day(2024, 1, 20));
            assert!(matches!(
                result,
                Err(CoreError::Rule(RuleError::UnknownRuleKind(_)))
            ));
        }
    }

    mod completion_tests {
        use super::*;
        use async_trait::async_trait;
        use std::sync::Mutex;

        /// Keeps tasks in a vector; enough to drive the planner without SQLite.
        #[derive(Default)]
        struct MemoryRepository {
            tasks: Mutex<Vec<Task>>,
        }

        #[async_trait]
        impl TaskRepository for MemoryRepository {
            async fn add_task(&self, task: NewTask) -> Result<Task, CoreError> {
                let mut tasks = self.tasks.lock().unwrap();
                let task = Task {
                    id: tasks.len() as i64 + 1,
                    date: task.date,
                    title: task.title,
                    comment: task.comment,
                    repeat: task.repeat,
                };
                tasks.push(task.clone());
                Ok(task)
            }

            async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
                Ok(self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned())
            }

            async fn find_upcoming_tasks(&self, from: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError> {
                let from = format_date(from);
                let mut tasks: Vec<Task> = self
                    .tasks
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|t| t.date >= from)
                    .cloned()
                    .collect();
                tasks.sort_by(|a, b| a.date.cmp(&b.date));
                tasks.truncate(limit as usize);
                Ok(tasks)
            }

            async fn find_tasks_by_date(&self, date: NaiveDate, limit: u32) -> Result<Vec<Task>, CoreError> {
                let date = format_date(date);
                Ok(self
                    .tasks
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|t| t.date == date)
                    .take(limit as usize)
                    .cloned()
                    .collect())
            }

            async fn search_tasks(&self, text: &str, limit: u32) -> Result<Vec<Task>, CoreError> {
                Ok(self
                    .tasks
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|t| t.title.contains(text) || t.comment.contains(text))
                    .take(limit as usize)
                    .cloned()
                    .collect())
            }

            async fn update_task(&self, task: &Task) -> Result<Task, CoreError> {
                let mut tasks = self.tasks.lock().unwrap();
                let slot = tasks
                    .iter_mut()
                    .find(|t| t.id == task.id)
                    .ok_or_else(|| CoreError::NotFound(task.id.to_string()))?;
                *slot = task.clone();
                Ok(task.clone())
            }

            async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
                let mut tasks = self.tasks.lock().unwrap();
                let before = tasks.len();
                tasks.retain(|t| t.id != id);
                if tasks.len() == before {
                    return Err(CoreError::NotFound(id.to_string()));
                }
                Ok(())
            }
        }

        #[test]
        fn test_recurring_task_steps_from_stored_date() {
            let planner = Planner::new(MemoryRepository::default());
            let today = day(2024, 1, 20);

            tokio_test::block_on(async {
                let task = planner.add_task(input("20240125", "d 7"), today).await.unwrap();

                // The stored date is already ahead of today, so one step is taken.
                let moved = match planner.complete_task(task.id, today).await.unwrap() {
                    CompletionResult::Rescheduled(task) => task,
                    other => panic!("expected a rescheduled task, got {other:?}"),
                };
                assert_eq!(moved.date, "20240201");
                assert_eq!(planner.find_task(task.id).await.unwrap().date, "20240201");
            });
        }

        #[test]
        fn test_one_off_task_is_removed() {
            let planner = Planner::new(MemoryRepository::default());
            let today = day(2024, 1, 20);

            tokio_test::block_on(async {
                let task = planner.add_task(input("", ""), today).await.unwrap();
                let result = planner.complete_task(task.id, today).await.unwrap();
                assert!(matches!(result, CompletionResult::Deleted(_)));
                assert!(matches!(
                    planner.find_task(task.id).await,
                    Err(CoreError::NotFound(_))
                ));
            });
        }

        #[test]
        fn test_list_routes_date_searches() {
            let planner = Planner::new(MemoryRepository::default()).with_list_limit(1);
            let today = day(2024, 1, 20);

            tokio_test::block_on(async {
                planner.add_task(input("20240208", ""), today).await.unwrap();
                planner.add_task(input("20240209", ""), today).await.unwrap();

                let upcoming = planner.list_tasks(None, today).await.unwrap();
                assert_eq!(upcoming.len(), 1);
                assert_eq!(upcoming[0].date, "20240208");

                let on_date = planner.list_tasks(Some("09.02.2024"), today).await.unwrap();
                assert_eq!(on_date.len(), 1);
                assert_eq!(on_date[0].date, "20240209");

                let by_text = planner.list_tasks(Some("plants"), today).await.unwrap();
                assert_eq!(by_text.len(), 1);
            });
        }
    }
}
