//! Pantry CLI Application
//!
//! Command-line front end for the Pantry meal planner backend.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pantry_core::{dates, PantryBuilder};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_url,
        config,
        first_day,
        no_color,
        command,
    } = Args::parse();

    let pantry = PantryBuilder::new()
        .with_config_file(config)
        .with_base_url(api_url)
        .with_first_day_of_week(first_day)
        .build()
        .context("Failed to initialize pantry client")?;

    info!("Pantry started against {}", pantry.config().api_base_url);

    let cli = Cli::new(pantry, TerminalRenderer::new(!no_color));
    match command {
        Some(Commands::Recipe { command }) => cli.handle_recipe_command(command).await,
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Health) => cli.health().await,
        None => cli.show_day(dates::today()).await,
    }
}
