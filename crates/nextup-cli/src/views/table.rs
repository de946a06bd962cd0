use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use nextup_core::models::Task;
use owo_colors::OwoColorize;

use crate::util::today;

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let today = today();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Comment", "Repeat"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(date_cell(task, today));

        let mut title = String::new();
        if task.is_recurring() {
            title.push('↻'); // Recurring symbol
            title.push(' ');
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(Cell::new(&task.comment));
        row.add_cell(Cell::new(if task.is_recurring() { task.repeat.as_str() } else { "-" }));
        table.add_row(row);
    }

    println!("{table}");
}

fn date_cell(task: &Task, today: NaiveDate) -> Cell {
    let cell = Cell::new(&task.date);
    match task.due_date() {
        Ok(due) if due < today => cell.fg(Color::Red), // Overdue
        Ok(due) if due == today => cell.fg(Color::Yellow),
        _ => cell,
    }
}

pub fn display_task(task: &Task) {
    println!("{} {}", "Task".bold(), task.id.to_string().yellow());
    println!("  Title:   {}", task.title.bright_white().bold());
    println!("  Date:    {}", task.date.cyan());
    if !task.comment.is_empty() {
        println!("  Comment: {}", task.comment);
    }
    if task.is_recurring() {
        println!("  Repeat:  {}", task.repeat.cyan());
    }
}
