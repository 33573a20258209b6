//! Executions command - the month-by-month work

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{execution::month_name, ExecutionPatch, ExecutionStatus, NewExecution};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct ExecutionsArgs {
    #[command(subcommand)]
    command: ExecutionsCommand,
}

#[derive(Subcommand)]
enum ExecutionsCommand {
    /// List executions, optionally narrowed to one month
    List {
        /// Month 1-12 (with --year, narrows to that month)
        #[arg(long)]
        month: Option<u32>,

        /// Year (defaults to the current year when --month is given)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Add an execution item
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Goal this item advances
        #[arg(long)]
        goal: Option<i64>,
    },

    /// Edit an execution item
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// planned, in_progress, completed or deferred
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        goal: Option<i64>,
    },

    /// Mark an execution item completed
    Done {
        id: i64,
    },

    /// Delete an execution item
    Rm {
        id: i64,
    },
}

fn parse_status(s: &str) -> Result<ExecutionStatus> {
    s.parse().map_err(anyhow::Error::msg)
}

pub async fn run(args: ExecutionsArgs, app: &App) -> Result<()> {
    match args.command {
        ExecutionsCommand::List { month, year } => list(app, month, year).await,
        ExecutionsCommand::Add {
            title,
            description,
            month,
            year,
            goal,
        } => {
            let now = Utc::now();
            let created = app
                .stores
                .executions
                .create(NewExecution {
                    goal,
                    title,
                    description,
                    month: month.unwrap_or_else(|| now.month()),
                    year: year.unwrap_or_else(|| now.year()),
                    status: None,
                })
                .await?;
            println!(
                "{} execution #{} \"{}\" in {} {}",
                "Created".green().bold(),
                created.id,
                created.title,
                month_name(created.month),
                created.year
            );
            Ok(())
        }
        ExecutionsCommand::Edit {
            id,
            title,
            description,
            status,
            month,
            year,
            goal,
        } => {
            app.stores
                .executions
                .update(
                    id,
                    ExecutionPatch {
                        goal,
                        title,
                        description,
                        month,
                        year,
                        status: status.as_deref().map(parse_status).transpose()?,
                    },
                )
                .await?;
            println!("{} execution #{id}.", "Updated".green().bold());
            Ok(())
        }
        ExecutionsCommand::Done { id } => {
            let updated = app
                .stores
                .executions
                .update(
                    id,
                    ExecutionPatch {
                        status: Some(ExecutionStatus::Completed),
                        ..Default::default()
                    },
                )
                .await?;
            println!("{} \"{}\"", "Completed".green().bold(), updated.title);
            Ok(())
        }
        ExecutionsCommand::Rm { id } => {
            app.stores.executions.delete(id).await?;
            println!("{} execution #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}

async fn list(app: &App, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let now = Utc::now();
    let executions = if month.is_some() || year.is_some() {
        let month = month.unwrap_or_else(|| now.month());
        let year = year.unwrap_or_else(|| now.year());
        app.stores.executions.by_month(month, year).await?
    } else {
        app.stores.executions.list().await?
    };

    if executions.is_empty() {
        output::empty_hint("executions", "Add one with `horizon executions add \"...\"`.");
        return Ok(());
    }

    let mut table = output::table(&["ID", "Title", "Month", "Status", "Goal"]);
    for execution in &executions {
        table.add_row(vec![
            comfy_table::Cell::new(execution.id),
            comfy_table::Cell::new(&execution.title),
            comfy_table::Cell::new(format!(
                "{} {}",
                month_name(execution.month),
                execution.year
            )),
            output::execution_status_cell(execution.status),
            comfy_table::Cell::new(
                execution
                    .goal
                    .map(|g| format!("#{g}"))
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }
    println!("{table}");
    Ok(())
}
