use anyhow::Result;
use nextup_core::models::CompletionResult;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;

use crate::cli::DoneCommand;
use crate::util::today;

pub async fn done_task<R: TaskRepository + Send + Sync>(planner: &Planner<R>, command: DoneCommand) -> Result<()> {
    match planner.complete_task(command.id, today()).await? {
        CompletionResult::Deleted(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled(task) => {
            println!("Completed task: '{}'", task.title);
            println!("Next occurrence on {} ({})", task.date, task.repeat);
        }
    }

    Ok(())
}
