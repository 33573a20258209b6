//! Goals command

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{GoalPatch, GoalStatus, NewGoal};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct GoalsArgs {
    #[command(subcommand)]
    command: GoalsCommand,
}

#[derive(Subcommand)]
enum GoalsCommand {
    /// List goals
    List {
        /// Filter by status (pending, in_progress, completed)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one goal with its KPIs
    Show {
        id: i64,
    },

    /// Add a goal
    Add {
        /// Goal title
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Vision to attach the goal to
        #[arg(long)]
        vision: Option<i64>,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,
    },

    /// Edit a goal
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// New status (pending, in_progress, completed)
        #[arg(long)]
        status: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,

        #[arg(long)]
        vision: Option<i64>,
    },

    /// Mark a goal completed
    Done {
        id: i64,
    },

    /// Delete a goal
    Rm {
        id: i64,
    },
}

pub async fn run(args: GoalsArgs, app: &App) -> Result<()> {
    match args.command {
        GoalsCommand::List { status } => list(app, status).await,
        GoalsCommand::Show { id } => show(app, id).await,
        GoalsCommand::Add {
            title,
            description,
            vision,
            target_date,
        } => add(app, title, description, vision, target_date).await,
        GoalsCommand::Edit {
            id,
            title,
            description,
            status,
            target_date,
            vision,
        } => edit(app, id, title, description, status, target_date, vision).await,
        GoalsCommand::Done { id } => {
            let updated = app
                .stores
                .goals
                .update(
                    id,
                    GoalPatch {
                        status: Some(GoalStatus::Completed),
                        ..Default::default()
                    },
                )
                .await?;
            println!("{} \"{}\"", "Completed".green().bold(), updated.title);
            Ok(())
        }
        GoalsCommand::Rm { id } => {
            app.stores.goals.delete(id).await?;
            println!("{} goal #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}

fn parse_status(s: &str) -> Result<GoalStatus> {
    s.parse().map_err(anyhow::Error::msg)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

async fn list(app: &App, status: Option<String>) -> Result<()> {
    let goals = match status {
        Some(s) => app.stores.goals.by_status(parse_status(&s)?).await?,
        None => app.stores.goals.list().await?,
    };
    if goals.is_empty() {
        output::empty_hint("goals", "Add one with `horizon goals add \"...\"`.");
        return Ok(());
    }

    let mut table = output::table(&["ID", "Title", "Status", "Target", "Progress"]);
    for goal in &goals {
        table.add_row(vec![
            comfy_table::Cell::new(goal.id),
            comfy_table::Cell::new(&goal.title),
            output::goal_status_cell(goal.status),
            comfy_table::Cell::new(
                goal.target_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            comfy_table::Cell::new(output::progress(goal.progress_percentage)),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn show(app: &App, id: i64) -> Result<()> {
    let goal = app.stores.goals.get(id).await?;

    println!("{} {}", format!("#{}", goal.id).cyan().bold(), goal.title.bold());
    println!("  status: {}", goal.status);
    if let Some(target) = goal.target_date {
        println!("  target: {target}");
    }
    println!("  progress: {}", output::progress(goal.progress_percentage));
    if !goal.description.is_empty() {
        println!("  {}", goal.description);
    }

    let kpis: Vec<_> = app
        .stores
        .kpis
        .list()
        .await?
        .into_iter()
        .filter(|k| k.goal == id)
        .collect();
    if !kpis.is_empty() {
        println!();
        let mut table = output::table(&["KPI", "Actual", "Target", "Unit", "Progress"]);
        for kpi in &kpis {
            table.add_row(vec![
                comfy_table::Cell::new(&kpi.name),
                comfy_table::Cell::new(kpi.actual_value),
                comfy_table::Cell::new(kpi.target_value),
                comfy_table::Cell::new(&kpi.unit),
                comfy_table::Cell::new(output::progress(kpi.progress_percentage)),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

async fn add(
    app: &App,
    title: String,
    description: String,
    vision: Option<i64>,
    target_date: Option<String>,
) -> Result<()> {
    let target_date = target_date.as_deref().map(parse_date).transpose()?;
    let created = app
        .stores
        .goals
        .create(NewGoal {
            vision,
            title,
            description,
            status: None,
            target_date,
        })
        .await?;
    println!(
        "{} goal #{} \"{}\"",
        "Created".green().bold(),
        created.id,
        created.title
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn edit(
    app: &App,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    target_date: Option<String>,
    vision: Option<i64>,
) -> Result<()> {
    let patch = GoalPatch {
        vision,
        title,
        description,
        status: status.as_deref().map(parse_status).transpose()?,
        target_date: target_date.as_deref().map(parse_date).transpose()?,
    };
    let updated = app.stores.goals.update(id, patch).await?;
    println!("{} goal #{}.", "Updated".green().bold(), updated.id);
    Ok(())
}
