//! Dashboard command - the year at a glance

use anyhow::Result;
use chrono::{Datelike, Utc};
use colored::Colorize;

use horizon_core::{execution::month_name, GoalStatus, Severity};

use crate::output;
use crate::App;

pub async fn run(app: &App) -> Result<()> {
    let now = Utc::now();

    // Headline: this year's vision.
    let visions = app.stores.visions.list().await?;
    match visions.iter().find(|v| v.year == now.year()) {
        Some(vision) => {
            println!("{}", vision.north_star.bold());
            if !vision.yearly_theme.is_empty() {
                println!("{}", vision.yearly_theme.italic().dimmed());
            }
        }
        None => println!(
            "{}",
            format!("No vision set for {} yet.", now.year()).dimmed()
        ),
    }
    println!();

    // Goals with progress.
    let goals = app.stores.goals.list().await?;
    if goals.is_empty() {
        output::empty_hint("goals", "Add one with `horizon goals add \"...\"`.");
    } else {
        let completed = goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count();
        println!(
            "{} ({completed}/{} completed)",
            "Goals".cyan().bold(),
            goals.len()
        );
        let mut table = output::table(&["Title", "Status", "Progress"]);
        for goal in &goals {
            table.add_row(vec![
                comfy_table::Cell::new(&goal.title),
                output::goal_status_cell(goal.status),
                comfy_table::Cell::new(output::progress(goal.progress_percentage)),
            ]);
        }
        println!("{table}");
    }
    println!();

    // This month's executions.
    let executions = app
        .stores
        .executions
        .by_month(now.month(), now.year())
        .await?;
    println!(
        "{}",
        format!("{} {}", month_name(now.month()), now.year())
            .cyan()
            .bold()
    );
    if executions.is_empty() {
        println!("{}", "Nothing scheduled this month.".dimmed());
    } else {
        for execution in &executions {
            println!("  [{}] {}", execution.status, execution.title);
        }
    }
    println!();

    // Obstacles worth worrying about.
    let obstacles = app.stores.obstacles.list().await?;
    let mut pressing: Vec<_> = obstacles
        .iter()
        .filter(|o| o.severity >= Severity::High)
        .collect();
    pressing.sort_by(|a, b| b.severity.cmp(&a.severity));
    if !pressing.is_empty() {
        println!("{}", "Pressing obstacles".red().bold());
        for obstacle in pressing {
            println!("  [{}] {}", obstacle.severity, obstacle.title);
            if !obstacle.mitigation.is_empty() {
                println!("      mitigation: {}", obstacle.mitigation.dimmed());
            }
        }
    }

    Ok(())
}
