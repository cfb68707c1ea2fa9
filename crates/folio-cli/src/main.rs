//! Folio CLI - manage portfolio projects from the terminal
//!
//! Signs in to the portfolio's Supabase project and edits the projects shown
//! on the landing page.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::projects::run_projects;
use crate::commands::terminal::run_terminal;
use crate::commands::upload::run_upload;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "folio=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Projects { command } => run_projects(command, profile).await?,
        Commands::Upload {
            paths,
            project,
            gallery,
        } => run_upload(&paths, project.as_deref(), gallery, profile).await?,
        Commands::Terminal => run_terminal(profile).await?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Auth { command } => run_auth(command, profile).await?,
    }

    Ok(())
}
