use anyhow::Result;
use nextup_core::models::TaskInput;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::util::today;

/// Applies the given fields over the stored task; omitted fields keep their
/// current value. The result goes through the same date rules as `add`.
pub async fn edit_task<R: TaskRepository + Send + Sync>(planner: &Planner<R>, command: EditCommand) -> Result<()> {
    let task = planner.find_task(command.id).await?;

    let repeat = if command.repeat_clear {
        String::new()
    } else {
        command.repeat.unwrap_or(task.repeat)
    };

    let input = TaskInput {
        date: command.date.unwrap_or(task.date),
        title: command.title.unwrap_or(task.title),
        comment: command.comment.unwrap_or(task.comment),
        repeat,
    };

    let updated = planner.update_task(task.id, input, today()).await?;
    println!("Updated task with ID: {} (date {})", updated.id, updated.date);

    Ok(())
}
