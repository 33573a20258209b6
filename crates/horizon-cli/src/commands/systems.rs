//! Systems command

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{NewSystem, SystemPatch};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct SystemsArgs {
    #[command(subcommand)]
    command: SystemsCommand,
}

#[derive(Subcommand)]
enum SystemsCommand {
    /// List systems
    List,

    /// Add a system
    Add {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Free-form cadence ("every weekday morning")
        #[arg(long, default_value = "")]
        frequency: String,
    },

    /// Edit a system
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        frequency: Option<String>,
    },

    /// Delete a system
    Rm {
        id: i64,
    },
}

pub async fn run(args: SystemsArgs, app: &App) -> Result<()> {
    match args.command {
        SystemsCommand::List => {
            let systems = app.stores.systems.list().await?;
            if systems.is_empty() {
                output::empty_hint("systems", "Add one with `horizon systems add \"...\"`.");
                return Ok(());
            }
            let mut table = output::table(&["ID", "Name", "Frequency", "Description"]);
            for system in &systems {
                table.add_row(vec![
                    comfy_table::Cell::new(system.id),
                    comfy_table::Cell::new(&system.name),
                    comfy_table::Cell::new(&system.frequency),
                    comfy_table::Cell::new(&system.description),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        SystemsCommand::Add {
            name,
            description,
            frequency,
        } => {
            let created = app
                .stores
                .systems
                .create(NewSystem {
                    name,
                    description,
                    frequency,
                })
                .await?;
            println!(
                "{} system #{} \"{}\"",
                "Created".green().bold(),
                created.id,
                created.name
            );
            Ok(())
        }
        SystemsCommand::Edit {
            id,
            name,
            description,
            frequency,
        } => {
            app.stores
                .systems
                .update(
                    id,
                    SystemPatch {
                        name,
                        description,
                        frequency,
                    },
                )
                .await?;
            println!("{} system #{id}.", "Updated".green().bold());
            Ok(())
        }
        SystemsCommand::Rm { id } => {
            app.stores.systems.delete(id).await?;
            println!("{} system #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}
