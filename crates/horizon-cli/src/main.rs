//! Strategic Horizon CLI - yearly planning from the terminal
//!
//! # Usage
//!
//! ```bash
//! # Log in once; the session is stored under the user config dir
//! horizon login
//!
//! # The yearly vision
//! horizon vision show
//! horizon vision set --year 2026 --north-star "Depth over breadth" --theme "Year of Depth"
//!
//! # Goals and their KPIs
//! horizon goals list --status in_progress
//! horizon goals add "Run a marathon" --target-date 2026-10-01
//! horizon kpis add --goal 3 "Weekly mileage" --target 40 --unit km
//!
//! # The month's executions and the dashboard
//! horizon executions list --month 8 --year 2026
//! horizon dashboard
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;
mod output;

use commands::{
    dashboard, executions, goals, kpis, login, non_negotiables, obstacles, people, reflections,
    systems, vision,
};
use horizon_api::{Api, ApiConfig, FileTokenStore};
use horizon_store::Stores;

/// Strategic Horizon
///
/// A client for the Strategic Horizon planning service: one yearly
/// vision, goals with KPIs, monthly executions, obstacles and quarterly
/// reflections.
#[derive(Parser)]
#[command(
    name = "horizon",
    version,
    about = "Strategic Horizon - yearly planning from the terminal"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API server URL
    #[arg(long, env = "HORIZON_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// Drop the stored session
    Logout,

    /// The yearly vision
    Vision(vision::VisionArgs),

    /// Goals under the vision
    Goals(goals::GoalsArgs),

    /// KPIs attached to goals
    Kpis(kpis::KpisArgs),

    /// Recurring non-negotiable commitments
    #[command(name = "non-negotiables")]
    NonNegotiables(non_negotiables::NonNegotiablesArgs),

    /// Systems and habit loops
    Systems(systems::SystemsArgs),

    /// The people around the plan
    People(people::PeopleArgs),

    /// Monthly execution items
    Executions(executions::ExecutionsArgs),

    /// Obstacles and their mitigations
    Obstacles(obstacles::ObstaclesArgs),

    /// Quarterly reflections
    Reflections(reflections::ReflectionsArgs),

    /// Aggregate view of the year so far
    Dashboard,
}

/// Shared handles every command runs against.
pub struct App {
    pub api: Api,
    pub stores: Stores,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.api_url {
        Some(url) => ApiConfig::with_url(url),
        None => ApiConfig::from_env(),
    };
    let base_url = config.base_url.clone();

    let api = Api::new(config, Arc::new(FileTokenStore::open_default()));
    let stores = Stores::new(&api);
    let app = App { api, stores };

    // Session guard: presence only. An expired token is discovered by the
    // first 401, which the client answers with its one refresh-and-retry.
    if requires_session(&cli.command) && !app.api.http().is_authenticated() {
        println!("{}", "Not logged in.".yellow().bold());
        println!("Run {} first.", "horizon login".cyan());
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli.command, &app).await {
        output::report(&e, &base_url);
        std::process::exit(1);
    }
}

fn requires_session(command: &Commands) -> bool {
    !matches!(command, Commands::Login(_) | Commands::Logout)
}

async fn dispatch(command: Commands, app: &App) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(args, app).await,
        Commands::Logout => {
            app.api.http().logout();
            println!("{}", "Logged out.".green());
            Ok(())
        }
        Commands::Vision(args) => vision::run(args, app).await,
        Commands::Goals(args) => goals::run(args, app).await,
        Commands::Kpis(args) => kpis::run(args, app).await,
        Commands::NonNegotiables(args) => non_negotiables::run(args, app).await,
        Commands::Systems(args) => systems::run(args, app).await,
        Commands::People(args) => people::run(args, app).await,
        Commands::Executions(args) => executions::run(args, app).await,
        Commands::Obstacles(args) => obstacles::run(args, app).await,
        Commands::Reflections(args) => reflections::run(args, app).await,
        Commands::Dashboard => dashboard::run(app).await,
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn only_auth_commands_skip_the_session_guard() {
        let login = Cli::try_parse_from(["horizon", "login"]).unwrap();
        assert!(!requires_session(&login.command));

        let logout = Cli::try_parse_from(["horizon", "logout"]).unwrap();
        assert!(!requires_session(&logout.command));

        let dashboard = Cli::try_parse_from(["horizon", "dashboard"]).unwrap();
        assert!(requires_session(&dashboard.command));

        let goals = Cli::try_parse_from(["horizon", "goals", "list"]).unwrap();
        assert!(requires_session(&goals.command));
    }
}
