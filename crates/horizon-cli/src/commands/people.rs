//! People command

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{NewPerson, PersonPatch, PersonRole};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct PeopleArgs {
    #[command(subcommand)]
    command: PeopleCommand,
}

#[derive(Subcommand)]
enum PeopleCommand {
    /// List people
    List,

    /// Add a person
    Add {
        name: String,

        /// mentor, partner, supporter, advisor or other
        #[arg(long, default_value = "other")]
        role: String,

        #[arg(long, default_value = "")]
        role_description: String,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a person
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// mentor, partner, supporter, advisor or other
        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        role_description: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a person
    Rm {
        id: i64,
    },
}

fn parse_role(s: &str) -> Result<PersonRole> {
    s.parse().map_err(anyhow::Error::msg)
}

pub async fn run(args: PeopleArgs, app: &App) -> Result<()> {
    match args.command {
        PeopleCommand::List => {
            let people = app.stores.people.list().await?;
            if people.is_empty() {
                output::empty_hint("people", "Add one with `horizon people add \"...\"`.");
                return Ok(());
            }
            let mut table = output::table(&["ID", "Name", "Role", "About", "Contact"]);
            for person in &people {
                table.add_row(vec![
                    comfy_table::Cell::new(person.id),
                    comfy_table::Cell::new(&person.name),
                    comfy_table::Cell::new(person.role),
                    comfy_table::Cell::new(&person.role_description),
                    comfy_table::Cell::new(person.contact_info.as_deref().unwrap_or("-")),
                ]);
            }
            println!("{table}");
            Ok(())
        }
        PeopleCommand::Add {
            name,
            role,
            role_description,
            contact,
            notes,
        } => {
            let created = app
                .stores
                .people
                .create(NewPerson {
                    name,
                    role: parse_role(&role)?,
                    role_description,
                    contact_info: contact,
                    notes,
                })
                .await?;
            println!(
                "{} person #{} \"{}\"",
                "Created".green().bold(),
                created.id,
                created.name
            );
            Ok(())
        }
        PeopleCommand::Edit {
            id,
            name,
            role,
            role_description,
            contact,
            notes,
        } => {
            app.stores
                .people
                .update(
                    id,
                    PersonPatch {
                        name,
                        role: role.as_deref().map(parse_role).transpose()?,
                        role_description,
                        contact_info: contact,
                        notes,
                    },
                )
                .await?;
            println!("{} person #{id}.", "Updated".green().bold());
            Ok(())
        }
        PeopleCommand::Rm { id } => {
            app.stores.people.delete(id).await?;
            println!("{} person #{id}.", "Deleted".green().bold());
            Ok(())
        }
    }
}
