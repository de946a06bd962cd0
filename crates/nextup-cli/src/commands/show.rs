use anyhow::Result;
use nextup_core::models::TaskDto;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;

use crate::cli::ShowCommand;
use crate::views::table::display_task;

pub async fn show_task<R: TaskRepository + Send + Sync>(planner: &Planner<R>, command: ShowCommand) -> Result<()> {
    let task = planner.find_task(command.id).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&TaskDto::from(task))?);
    } else {
        display_task(&task);
    }

    Ok(())
}
