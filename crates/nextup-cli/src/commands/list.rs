use anyhow::Result;
use nextup_core::models::TaskDto;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::util::today;
use crate::views::table::display_tasks;

pub async fn list_tasks<R: TaskRepository + Send + Sync>(planner: &Planner<R>, command: ListCommand) -> Result<()> {
    let search = command.search.as_deref().filter(|s| !s.is_empty());
    let tasks = planner.list_tasks(search, today()).await?;

    if command.json {
        let dtos: Vec<TaskDto> = tasks.into_iter().map(TaskDto::from).collect();
        println!("{}", serde_json::to_string_pretty(&dtos)?);
    } else {
        display_tasks(&tasks);
    }

    Ok(())
}
