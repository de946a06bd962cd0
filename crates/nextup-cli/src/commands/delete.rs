use anyhow::Result;
use nextup_core::models::Task;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;

pub async fn delete_task<R: TaskRepository + Send + Sync>(planner: &Planner<R>, task: Task) -> Result<()> {
    planner.delete_task(task.id).await?;
    println!("Deleted task: '{}'", task.title);
    Ok(())
}
