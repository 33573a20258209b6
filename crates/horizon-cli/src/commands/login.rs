//! Login command

use std::io::Write;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use horizon_core::Credentials;

use crate::App;

#[derive(Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Password (prompted when omitted; the prompt keeps it out of
    /// shell history)
    #[arg(short, long)]
    password: Option<String>,
}

pub async fn run(args: LoginArgs, app: &App) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    app.api
        .http()
        .login(&Credentials { username, password })
        .await?;

    println!("{}", "Logged in.".green().bold());
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
