//! Vision command - the yearly north star

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;

use horizon_core::{NewVision, VisionPatch};

use crate::output;
use crate::App;

#[derive(Args)]
pub struct VisionArgs {
    #[command(subcommand)]
    command: VisionCommand,
}

#[derive(Subcommand)]
enum VisionCommand {
    /// Show the stored visions
    Show,

    /// Create or update the vision for a year
    Set {
        /// Planning year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// The north-star statement
        #[arg(long)]
        north_star: String,

        /// Theme for the year
        #[arg(long, default_value = "")]
        theme: String,
    },

    /// Delete the vision for a year
    Rm {
        /// Planning year
        year: i32,
    },
}

pub async fn run(args: VisionArgs, app: &App) -> Result<()> {
    match args.command {
        VisionCommand::Show => show(app).await,
        VisionCommand::Set {
            year,
            north_star,
            theme,
        } => set(app, year.unwrap_or_else(|| Utc::now().year()), north_star, theme).await,
        VisionCommand::Rm { year } => rm(app, year).await,
    }
}

async fn show(app: &App) -> Result<()> {
    let visions = app.stores.visions.list().await?;
    if visions.is_empty() {
        output::empty_hint(
            "vision",
            "Set one with `horizon vision set --north-star \"...\"`.",
        );
        return Ok(());
    }

    for vision in visions {
        println!("{}", format!("{}", vision.year).cyan().bold());
        println!("  {}", vision.north_star.bold());
        if !vision.yearly_theme.is_empty() {
            println!("  {}", vision.yearly_theme.italic());
        }
    }
    Ok(())
}

async fn set(app: &App, year: i32, north_star: String, theme: String) -> Result<()> {
    let existing = app.stores.visions.list().await?;
    match existing.iter().find(|v| v.year == year) {
        Some(vision) => {
            app.stores
                .visions
                .update(
                    vision.id,
                    VisionPatch {
                        north_star: Some(north_star),
                        yearly_theme: Some(theme),
                        ..Default::default()
                    },
                )
                .await?;
            println!("{} vision for {year}.", "Updated".green().bold());
        }
        None => {
            app.stores
                .visions
                .create(NewVision {
                    year,
                    north_star,
                    yearly_theme: theme,
                })
                .await?;
            println!("{} vision for {year}.", "Created".green().bold());
        }
    }
    Ok(())
}

async fn rm(app: &App, year: i32) -> Result<()> {
    let visions = app.stores.visions.list().await?;
    match visions.iter().find(|v| v.year == year) {
        Some(vision) => {
            app.stores.visions.delete(vision.id).await?;
            println!("{} vision for {year}.", "Deleted".green().bold());
        }
        None => println!("No vision stored for {year}."),
    }
    Ok(())
}
