//! Obstacles command

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{NewObstacle, ObstaclePatch, Severity};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct ObstaclesArgs {
    #[command(subcommand)]
    command: ObstaclesCommand,
}

#[derive(Subcommand)]
enum ObstaclesCommand {
    /// List obstacles, most severe first
    List,

    /// Log an obstacle
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// low, medium, high or critical
        #[arg(long, default_value = "medium")]
        severity: String,

        /// Goal this obstacle threatens
        #[arg(long)]
        goal: Option<i64>,

        /// Mitigation plan
        #[arg(long, default_value = "")]
        mitigation: String,
    },

    /// Edit an obstacle
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// low, medium, high or critical
        #[arg(long)]
        severity: Option<String>,

        #[arg(long)]
        goal: Option<i64>,

        #[arg(long)]
        mitigation: Option<String>,
    },

    /// Delete an obstacle
    Rm {
        id: i64,
    },
}

fn parse_severity(s: &str) -> Result<Severity> {
    s.parse().map_err(anyhow::Error::msg)
}

pub async fn run(args: ObstaclesArgs, app: &App) -> Result<()> {
    match args.command {
        ObstaclesCommand::List => {
            let mut obstacles = app.stores.obstacles.list().await?;
            if obstacles.is_empty() {
                output::empty_hint("obstacles", "Log one with `horizon obstacles add \"...\"`.");
                return Ok(());
            }
            obstacles.sort_by(|a, b| b.severity.cmp(&a.severity));

            let mut table = output::table(&["ID", "Title", "Severity", "Goal", "Mitigation"]);
            for obstacle in &obstacles {
                table.add_row(vec![
                    comfy_table::Cell::new(obstacle.id),
                    comfy_table::Cell::new(&obstacle.title),
                    output::severity_cell(obstacle.severity),
                    comfy_table::Cell::new(
                        obstacle
                            .goal
                            .map(|g| format!("#{g}"))
                            .unwrap_or_else(|| "-".into()),
                    ),
                    comfy_table::Cell::new(&obstacle.mitigation),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        ObstaclesCommand::Add {
            title,
            description,
            severity,
            goal,
            mitigation,
        } => {
            let created = app
                .stores
                .obstacles
                .create(NewObstacle {
                    goal,
                    title,
                    description,
                    severity: parse_severity(&severity)?,
                    mitigation,
                })
                .await?;
            println!(
                "{} obstacle #{} \"{}\"",
                "Logged".green().bold(),
                created.id,
                created.title
            );
            Ok(())
        }
        ObstaclesCommand::Edit {
            id,
            title,
            description,
            severity,
            goal,
            mitigation,
        } => {
            app.stores
                .obstacles
                .update(
                    id,
                    ObstaclePatch {
                        goal,
                        title,
                        description,
                        severity: severity.as_deref().map(parse_severity).transpose()?,
                        mitigation,
                    },
                )
                .await?;
            println!("{} obstacle #{id}.", "Updated".green().bold());
            Ok(())
        }
        ObstaclesCommand::Rm { id } => {
            app.stores.obstacles.delete(id).await?;
            println!("{} obstacle #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}
