use anyhow::Result;
use nextup_core::models::TaskInput;
use nextup_core::planner::Planner;
use nextup_core::repository::TaskRepository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::util::{date_or_today, today};

pub async fn add_task<R: TaskRepository + Send + Sync>(planner: &Planner<R>, command: AddCommand) -> Result<()> {
    let repeat = match (command.repeat, command.every) {
        (Some(raw), _) => raw,
        (None, Some(shortcut)) => shortcut.to_rule(date_or_today(command.date.as_deref())?),
        (None, None) => String::new(),
    };

    let input = TaskInput {
        date: command.date.unwrap_or_default(),
        title: command.title,
        comment: command.comment.unwrap_or_default(),
        repeat,
    };

    let task = planner.add_task(input, today()).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        task.id.to_string().yellow()
    );
    println!("  {} Date: {}", "→".style(info_style), task.date.cyan());
    if task.is_recurring() {
        println!("  {} Repeats: {}", "→".style(info_style), task.repeat.cyan());
    }

    Ok(())
}
