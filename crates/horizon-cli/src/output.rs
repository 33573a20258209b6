//! Terminal rendering: tables, status colors, and the error block
//!
//! Every command failure ends up in [`report`], which prints the fixed
//! title and message for the error case plus contextual troubleshooting
//! steps. Nothing here panics; rendering an error is the end of the
//! road, not an exception.

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use horizon_api::ApiError;
use horizon_core::{ExecutionStatus, GoalStatus, Severity};

/// A table in the house style.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

/// Zero-state line for an empty list.
pub fn empty_hint(what: &str, hint: &str) {
    println!("{}", format!("No {what} yet.").dimmed());
    println!("{}", hint.dimmed());
}

pub fn goal_status_cell(status: GoalStatus) -> Cell {
    let color = match status {
        GoalStatus::Pending => Color::Yellow,
        GoalStatus::InProgress => Color::Blue,
        GoalStatus::Completed => Color::Green,
    };
    Cell::new(status.to_string()).fg(color)
}

pub fn execution_status_cell(status: ExecutionStatus) -> Cell {
    let color = match status {
        ExecutionStatus::Planned => Color::Yellow,
        ExecutionStatus::InProgress => Color::Blue,
        ExecutionStatus::Completed => Color::Green,
        ExecutionStatus::Deferred => Color::DarkGrey,
    };
    Cell::new(status.to_string()).fg(color)
}

pub fn severity_cell(severity: Severity) -> Cell {
    let color = match severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::Red,
        Severity::Critical => Color::Magenta,
    };
    Cell::new(severity.to_string()).fg(color)
}

/// "40%" or "-".
pub fn progress(progress_percentage: Option<f64>) -> String {
    match progress_percentage {
        Some(p) => format!("{:.0}%", p),
        None => "-".to_string(),
    }
}

/// Render a command failure inline and in full.
pub fn report(error: &anyhow::Error, api_url: &str) {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) => render_api_error(api_error, api_url),
        None => eprintln!("{} {error:#}", "Error:".red().bold()),
    }
}

fn render_api_error(error: &ApiError, api_url: &str) {
    eprintln!("{}", error.title().red().bold());
    eprintln!("{}", error.message());
    if let Some(status) = error.status() {
        eprintln!("{}", format!("Status code: {status}").dimmed());
    }
    eprintln!();
    eprintln!("{}", "Troubleshooting:".bold());
    for step in troubleshooting_steps(error, api_url) {
        eprintln!("  - {step}");
    }
}

/// Contextual troubleshooting steps per error case.
fn troubleshooting_steps(error: &ApiError, api_url: &str) -> Vec<String> {
    match error.status() {
        None if error.is_network() => vec![
            "Ensure the backend server is running".to_string(),
            format!("Verify the API is accessible at {api_url}"),
            "Check your network connection".to_string(),
        ],
        Some(401) => vec![
            "Try logging in again with `horizon login`".to_string(),
            "Your session may have expired".to_string(),
            "Check that your credentials are correct".to_string(),
        ],
        Some(403) => vec![
            "You may not have permission to access this resource".to_string(),
            "Verify you are logged in with the correct account".to_string(),
        ],
        Some(404) => vec![
            "The requested resource was not found".to_string(),
            "Check that the id exists with the matching `list` command".to_string(),
        ],
        Some(status) if status >= 500 => vec![
            "The server encountered an error".to_string(),
            "Try again in a few moments".to_string(),
            "Check the backend logs".to_string(),
        ],
        _ => vec![
            "Re-run with -vv for detailed logs".to_string(),
            format!("Verify the API is accessible at {api_url}"),
        ],
    }
}
