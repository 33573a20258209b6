//! Quarterly reflections command

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{NewReflection, ReflectionPatch};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct ReflectionsArgs {
    #[command(subcommand)]
    command: ReflectionsCommand,
}

#[derive(Subcommand)]
enum ReflectionsCommand {
    /// List reflections
    List,

    /// Read one reflection in full
    Show {
        id: i64,
    },

    /// Write a reflection for a quarter
    Add {
        /// Quarter 1-4
        #[arg(long)]
        quarter: u8,

        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[arg(long, default_value = "")]
        wins: String,

        #[arg(long, default_value = "")]
        challenges: String,

        #[arg(long, default_value = "")]
        lessons: String,

        #[arg(long, default_value = "")]
        adjustments: String,
    },

    /// Edit a reflection
    Edit {
        id: i64,

        #[arg(long)]
        quarter: Option<u8>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        wins: Option<String>,

        #[arg(long)]
        challenges: Option<String>,

        #[arg(long)]
        lessons: Option<String>,

        #[arg(long)]
        adjustments: Option<String>,
    },

    /// Delete a reflection
    Rm {
        id: i64,
    },
}

pub async fn run(args: ReflectionsArgs, app: &App) -> Result<()> {
    match args.command {
        ReflectionsCommand::List => {
            let reflections = app.stores.reflections.list().await?;
            if reflections.is_empty() {
                output::empty_hint(
                    "reflections",
                    "Write one with `horizon reflections add --quarter <1-4>`.",
                );
                return Ok(());
            }
            let mut table = output::table(&["ID", "Quarter", "Wins", "Challenges"]);
            for reflection in &reflections {
                table.add_row(vec![
                    comfy_table::Cell::new(reflection.id),
                    comfy_table::Cell::new(reflection.label()),
                    comfy_table::Cell::new(excerpt(&reflection.wins)),
                    comfy_table::Cell::new(excerpt(&reflection.challenges)),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        ReflectionsCommand::Show { id } => {
            let reflection = app.stores.reflections.get(id).await?;
            println!("{}", reflection.label().cyan().bold());
            section("Wins", &reflection.wins);
            section("Challenges", &reflection.challenges);
            section("Lessons learned", &reflection.lessons_learned);
            section("Adjustments", &reflection.adjustments);
            Ok(())
        }
        ReflectionsCommand::Add {
            quarter,
            year,
            wins,
            challenges,
            lessons,
            adjustments,
        } => {
            anyhow::ensure!((1..=4).contains(&quarter), "quarter must be 1-4");
            let created = app
                .stores
                .reflections
                .create(NewReflection {
                    quarter,
                    year: year.unwrap_or_else(|| Utc::now().year()),
                    wins,
                    challenges,
                    lessons_learned: lessons,
                    adjustments,
                })
                .await?;
            println!(
                "{} reflection {} (#{}).",
                "Created".green().bold(),
                created.label(),
                created.id
            );
            Ok(())
        }
        ReflectionsCommand::Edit {
            id,
            quarter,
            year,
            wins,
            challenges,
            lessons,
            adjustments,
        } => {
            app.stores
                .reflections
                .update(
                    id,
                    ReflectionPatch {
                        quarter,
                        year,
                        wins,
                        challenges,
                        lessons_learned: lessons,
                        adjustments,
                    },
                )
                .await?;
            println!("{} reflection #{id}.", "Updated".green().bold());
            Ok(())
        }
        ReflectionsCommand::Rm { id } => {
            app.stores.reflections.delete(id).await?;
            println!("{} reflection #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}

fn section(title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold());
    println!("{body}");
}

fn excerpt(s: &str) -> String {
    const MAX: usize = 48;
    if s.chars().count() <= MAX {
        s.to_string()
    } else {
        let cut: String = s.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
