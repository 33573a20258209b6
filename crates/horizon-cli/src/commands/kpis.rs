//! KPIs command

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{KpiPatch, NewKpi};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct KpisArgs {
    #[command(subcommand)]
    command: KpisCommand,
}

#[derive(Subcommand)]
enum KpisCommand {
    /// List KPIs
    List {
        /// Only KPIs of one goal
        #[arg(long)]
        goal: Option<i64>,
    },

    /// Add a KPI to a goal
    Add {
        /// KPI name
        name: String,

        /// Goal the KPI measures
        #[arg(long)]
        goal: i64,

        /// Target value
        #[arg(long)]
        target: f64,

        /// Unit label ("km", "signups")
        #[arg(long, default_value = "")]
        unit: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Starting actual value
        #[arg(long)]
        actual: Option<f64>,
    },

    /// Edit a KPI (record progress with --actual)
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        target: Option<f64>,

        #[arg(long)]
        actual: Option<f64>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a KPI
    Rm {
        id: i64,
    },
}

pub async fn run(args: KpisArgs, app: &App) -> Result<()> {
    match args.command {
        KpisCommand::List { goal } => list(app, goal).await,
        KpisCommand::Add {
            name,
            goal,
            target,
            unit,
            description,
            actual,
        } => {
            let created = app
                .stores
                .kpis
                .create(NewKpi {
                    goal,
                    name,
                    description,
                    target_value: target,
                    actual_value: actual,
                    unit,
                })
                .await?;
            println!(
                "{} KPI #{} \"{}\"",
                "Created".green().bold(),
                created.id,
                created.name
            );
            Ok(())
        }
        KpisCommand::Edit {
            id,
            name,
            target,
            actual,
            unit,
            description,
        } => {
            let updated = app
                .stores
                .kpis
                .update(
                    id,
                    KpiPatch {
                        name,
                        description,
                        target_value: target,
                        actual_value: actual,
                        unit,
                    },
                )
                .await?;
            println!(
                "{} KPI #{} ({} {} of {} {})",
                "Updated".green().bold(),
                updated.id,
                updated.actual_value,
                updated.unit,
                updated.target_value,
                updated.unit,
            );
            Ok(())
        }
        KpisCommand::Rm { id } => {
            app.stores.kpis.delete(id).await?;
            println!("{} KPI #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}

async fn list(app: &App, goal: Option<i64>) -> Result<()> {
    let mut kpis = app.stores.kpis.list().await?;
    if let Some(goal) = goal {
        kpis.retain(|k| k.goal == goal);
    }
    if kpis.is_empty() {
        output::empty_hint("KPIs", "Add one with `horizon kpis add --goal <id> \"...\"`.");
        return Ok(());
    }

    let mut table = output::table(&["ID", "Goal", "Name", "Actual", "Target", "Unit", "Progress"]);
    for kpi in &kpis {
        table.add_row(vec![
            comfy_table::Cell::new(kpi.id),
            comfy_table::Cell::new(kpi.goal),
            comfy_table::Cell::new(&kpi.name),
            comfy_table::Cell::new(kpi.actual_value),
            comfy_table::Cell::new(kpi.target_value),
            comfy_table::Cell::new(&kpi.unit),
            comfy_table::Cell::new(output::progress(kpi.progress_percentage)),
        ]);
    }
    println!("{table}");
    Ok(())
}
