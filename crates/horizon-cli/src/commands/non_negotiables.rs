//! Non-negotiables command

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{Frequency, NewNonNegotiable, NonNegotiablePatch};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct NonNegotiablesArgs {
    #[command(subcommand)]
    command: NonNegotiablesCommand,
}

#[derive(Subcommand)]
enum NonNegotiablesCommand {
    /// List non-negotiables
    List,

    /// Add a non-negotiable
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,
    },

    /// Edit a non-negotiable
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// daily, weekly or monthly
        #[arg(long)]
        frequency: Option<String>,
    },

    /// Delete a non-negotiable
    Rm {
        id: i64,
    },
}

fn parse_frequency(s: &str) -> Result<Frequency> {
    s.parse().map_err(anyhow::Error::msg)
}

pub async fn run(args: NonNegotiablesArgs, app: &App) -> Result<()> {
    match args.command {
        NonNegotiablesCommand::List => {
            let items = app.stores.non_negotiables.list().await?;
            if items.is_empty() {
                output::empty_hint(
                    "non-negotiables",
                    "Add one with `horizon non-negotiables add \"...\"`.",
                );
                return Ok(());
            }
            let mut table = output::table(&["ID", "Title", "Frequency", "Description"]);
            for item in &items {
                table.add_row(vec![
                    comfy_table::Cell::new(item.id),
                    comfy_table::Cell::new(&item.title),
                    comfy_table::Cell::new(item.frequency),
                    comfy_table::Cell::new(&item.description),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        NonNegotiablesCommand::Add {
            title,
            description,
            frequency,
        } => {
            let created = app
                .stores
                .non_negotiables
                .create(NewNonNegotiable {
                    title,
                    description,
                    frequency: parse_frequency(&frequency)?,
                })
                .await?;
            println!(
                "{} non-negotiable #{} \"{}\"",
                "Created".green().bold(),
                created.id,
                created.title
            );
            Ok(())
        }
        NonNegotiablesCommand::Edit {
            id,
            title,
            description,
            frequency,
        } => {
            app.stores
                .non_negotiables
                .update(
                    id,
                    NonNegotiablePatch {
                        title,
                        description,
                        frequency: frequency.as_deref().map(parse_frequency).transpose()?,
                    },
                )
                .await?;
            println!("{} non-negotiable #{id}.", "Updated".green().bold());
            Ok(())
        }
        NonNegotiablesCommand::Rm { id } => {
            app.stores.non_negotiables.delete(id).await?;
            println!("{} non-negotiable #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}
