use clap::Parser;
use dialoguer::Confirm;
use nextup_core::db;
use nextup_core::error::{CoreError, RuleError};
use nextup_core::planner::Planner;
use nextup_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    init_logging(&config.log_level);

    let cli = cli::Cli::parse();
    tracing::debug!(command = ?cli.command, "starting");

    if let Err(e) = run(cli.command, &config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(command: cli::Commands, config: &config::Config) -> anyhow::Result<()> {
    // Rule arithmetic needs no database.
    match command {
        cli::Commands::NextDate(command) => return commands::next_date::next_date(command),
        cli::Commands::Preview(command) => return commands::preview::preview(command),
        _ => {}
    }

    let pool = db::establish_connection(&config.database_path).await?;
    let planner = Planner::new(SqliteRepository::new(pool)).with_list_limit(config.list_limit);

    match command {
        cli::Commands::Add(command) => commands::add::add_task(&planner, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&planner, command).await,
        cli::Commands::Show(command) => commands::show::show_task(&planner, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&planner, command).await,
        cli::Commands::Done(command) => commands::done::done_task(&planner, command).await,
        cli::Commands::Delete(command) => {
            let task = planner.find_task(command.id).await?;

            if !command.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to delete task '{}'?",
                        task.title
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }
            commands::delete::delete_task(&planner, task).await
        }
        cli::Commands::NextDate(_) | cli::Commands::Preview(_) => Ok(()),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::Rule(RuleError::EmptyRule)) => {
            eprintln!(
                "{} The task has no repeat rule, so it has no next date.",
                "Error:".style(error_style)
            );
        }
        Some(CoreError::Rule(rule_error)) => {
            eprintln!("{} {}", "Error:".style(error_style), rule_error.yellow());
        }
        Some(CoreError::NotFound(id)) => {
            eprintln!(
                "{} Task with ID '{}' not found.",
                "Error:".style(error_style),
                id
            );
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::Database(e)) => {
            tracing::error!(error = %e, "database failure");
            eprintln!("{} Database error: {}", "Error:".style(error_style), e);
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
